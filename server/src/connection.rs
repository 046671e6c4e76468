use std::{fmt::Display, sync::Arc};

use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::{Sink, SinkExt, stream::SplitSink};
use shared::signal_message::SignalMessage;
use tokio::sync::Mutex;

use crate::error::DeliveryError;

#[async_trait]
pub trait Connection: Send + Sync {
    async fn send(&self, message: &SignalMessage) -> Result<(), DeliveryError>;

    async fn close(&self);
}

pub type ConnectionHandle = Arc<dyn Connection>;

pub struct WsConnection<S = SplitSink<WebSocket, Message>> {
    sink: Mutex<S>,
}

impl<S> WsConnection<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }
}

#[async_trait]
impl<S> Connection for WsConnection<S>
where
    S: Sink<Message> + Unpin + Send,
    S::Error: Display,
{
    async fn send(&self, message: &SignalMessage) -> Result<(), DeliveryError> {
        self.sink
            .lock()
            .await
            .send(Message::Text(message.to_text().into()))
            .await
            .map_err(|e| DeliveryError(e.to_string()))
    }

    async fn close(&self) {
        if let Err(e) = self.sink.lock().await.close().await {
            log::debug!("Error closing connection: {}", e);
        }
    }
}
