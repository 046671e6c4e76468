use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinError {
    #[error("Missing roomID")]
    MissingRoomId,
    #[error("Missing username")]
    MissingUsername,
}

impl IntoResponse for JoinError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

#[derive(Debug, Error)]
#[error("Failed to deliver message: {0}")]
pub struct DeliveryError(pub String);

#[derive(Debug, Error)]
pub enum ReceiveError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Malformed message: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Peer vanished without closing")]
    PeerVanished,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnqueueError {
    #[error("Broadcast queue is full")]
    QueueFull,
    #[error("Broadcast dispatcher has stopped")]
    DispatcherStopped,
}
