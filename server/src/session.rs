use futures::{Stream, StreamExt};
use log::{info, warn};
use shared::{RoomID, received_signal::ReceivedSignal, signal_message::SignalMessage};

use crate::{
    broadcaster::{BroadcastItem, BroadcastSender},
    connection::ConnectionHandle,
    error::ReceiveError,
    room::{RoomRegistry, SessionId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Joined,
    Closed,
}

pub struct ConnectionSession {
    id: SessionId,
    room_id: RoomID,
    username: String,
    handle: ConnectionHandle,
    state: SessionState,
}

impl ConnectionSession {
    pub fn new(room_id: RoomID, username: String, handle: ConnectionHandle) -> Self {
        Self {
            id: SessionId::new(),
            room_id,
            username,
            handle,
            state: SessionState::Connecting,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub async fn join(&mut self, registry: &RoomRegistry, broadcaster: &BroadcastSender) {
        if self.state != SessionState::Connecting {
            return;
        }

        registry
            .join(
                &self.room_id,
                false,
                self.id,
                self.handle.clone(),
                &self.username,
            )
            .await;
        self.state = SessionState::Joined;

        self.forward(SignalMessage::join_announcement(), broadcaster)
            .await;
    }

    pub async fn run<S>(
        &mut self,
        mut inbound: S,
        registry: &RoomRegistry,
        broadcaster: &BroadcastSender,
    ) where
        S: Stream<Item = Result<ReceivedSignal, ReceiveError>> + Unpin,
    {
        while self.state == SessionState::Joined {
            match inbound.next().await {
                Some(Ok(ReceivedSignal::Message(message))) => {
                    self.forward(message, broadcaster).await;
                }
                Some(Ok(ReceivedSignal::Closed)) => {
                    self.close_by_peer(registry).await;
                }
                Some(Err(e)) => {
                    self.close_on_error(e, registry).await;
                }
                None => {
                    self.close_on_error(ReceiveError::PeerVanished, registry)
                        .await;
                }
            }
        }
    }

    async fn forward(&self, message: SignalMessage, broadcaster: &BroadcastSender) {
        let item = BroadcastItem {
            message,
            room_id: self.room_id.clone(),
            origin: self.id,
        };

        if let Err(e) = broadcaster.enqueue(item).await {
            warn!(
                "Dropped message from {} in room {}: {}",
                self.username, self.room_id, e
            );
        }
    }

    async fn close_by_peer(&mut self, registry: &RoomRegistry) {
        info!("{} closed the connection", self.username);

        registry.leave(&self.room_id, self.id).await;
        self.state = SessionState::Closed;
    }

    async fn close_on_error(&mut self, error: ReceiveError, registry: &RoomRegistry) {
        warn!("Read error from {}: {}", self.username, error);

        registry.leave(&self.room_id, self.id).await;
        self.handle.close().await;
        self.state = SessionState::Closed;
    }
}
