use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};
use shared::{RoomID, signal_message::SignalMessage};
use tokio::sync::{
    Mutex,
    mpsc::{self, error::SendTimeoutError, error::TrySendError},
};

use crate::{
    config::{OverflowPolicy, ServerConfig},
    error::EnqueueError,
    room::{RoomRegistry, SessionId},
};

#[derive(Debug, Clone)]
pub struct BroadcastItem {
    pub message: SignalMessage,
    pub room_id: RoomID,
    pub origin: SessionId,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BroadcastStats {
    pub items_dispatched: u64,
    pub messages_delivered: u64,
    pub deliveries_failed: u64,
    pub items_discarded: u64,
    pub items_dropped: u64,
}

#[derive(Clone)]
pub struct BroadcastSender {
    sender: mpsc::Sender<BroadcastItem>,
    overflow_policy: OverflowPolicy,
    enqueue_timeout: Duration,
    stats: Arc<Mutex<BroadcastStats>>,
}

impl BroadcastSender {
    pub async fn enqueue(&self, item: BroadcastItem) -> Result<(), EnqueueError> {
        let result = match self.overflow_policy {
            OverflowPolicy::DropNewest => self.sender.try_send(item).map_err(|e| match e {
                TrySendError::Full(_) => EnqueueError::QueueFull,
                TrySendError::Closed(_) => EnqueueError::DispatcherStopped,
            }),
            OverflowPolicy::Block => self
                .sender
                .send_timeout(item, self.enqueue_timeout)
                .await
                .map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => EnqueueError::QueueFull,
                    SendTimeoutError::Closed(_) => EnqueueError::DispatcherStopped,
                }),
        };

        if let Err(EnqueueError::QueueFull) = result {
            self.stats.lock().await.items_dropped += 1;
            warn!("Broadcast queue full, dropping message");
        }

        result
    }

    pub async fn stats(&self) -> BroadcastStats {
        self.stats.lock().await.clone()
    }
}

pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
    receiver: mpsc::Receiver<BroadcastItem>,
    stats: Arc<Mutex<BroadcastStats>>,
}

impl Broadcaster {
    pub fn new(registry: Arc<RoomRegistry>, config: &ServerConfig) -> (Self, BroadcastSender) {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let stats = Arc::new(Mutex::new(BroadcastStats::default()));

        let broadcaster = Self {
            registry,
            receiver,
            stats: Arc::clone(&stats),
        };

        let broadcast_sender = BroadcastSender {
            sender,
            overflow_policy: config.overflow_policy,
            enqueue_timeout: config.enqueue_timeout,
            stats,
        };

        (broadcaster, broadcast_sender)
    }

    pub async fn run(mut self) {
        while let Some(item) = self.receiver.recv().await {
            self.dispatch(item).await;
        }

        info!("Broadcast dispatcher stopped");
    }

    async fn dispatch(&self, item: BroadcastItem) {
        let participants = self.registry.lookup(&item.room_id).await;

        if participants.is_empty() {
            self.stats.lock().await.items_discarded += 1;
            return;
        }

        let mut delivered = 0;
        let mut failed = 0;

        for participant in participants
            .iter()
            .filter(|participant| participant.session_id != item.origin)
        {
            match participant.handle.send(&item.message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        "Error broadcasting to {} in room {}: {}",
                        participant.name, item.room_id, e
                    );
                    failed += 1;

                    self.registry
                        .leave(&item.room_id, participant.session_id)
                        .await;
                    participant.handle.close().await;
                }
            }
        }

        let mut stats = self.stats.lock().await;
        stats.items_dispatched += 1;
        stats.messages_delivered += delivered;
        stats.deliveries_failed += failed;

        debug!(
            "Dispatched message in room {}: {} delivered, {} failed",
            item.room_id, delivered, failed
        );
    }
}
