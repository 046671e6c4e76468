use std::{sync::Arc, time::Duration};

use axum::extract::ws::{Message, WebSocket};
use futures::{StreamExt, future};
use log::info;
use shared::{RoomID, received_signal::ReceivedSignal, signal_message::SignalMessage};
use tokio::time::timeout;

use crate::{
    broadcaster::BroadcastSender,
    connection::{ConnectionHandle, WsConnection},
    error::ReceiveError,
    room::RoomRegistry,
    session::ConnectionSession,
};

const CLOSE_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

pub struct WsHandler;

impl WsHandler {
    pub async fn handle_socket(
        socket: WebSocket,
        room_id: RoomID,
        username: String,
        registry: Arc<RoomRegistry>,
        broadcaster: BroadcastSender,
    ) {
        let (sink, stream) = socket.split();
        let handle: ConnectionHandle = Arc::new(WsConnection::new(sink));

        let mut session = ConnectionSession::new(room_id.clone(), username.clone(), handle);
        session.join(&registry, &broadcaster).await;
        info!("{} has joined room {} as {}", username, room_id, session.id());

        let mut inbound =
            Box::pin(stream.filter_map(|result| future::ready(Self::read_signal(result))));
        session.run(&mut inbound, &registry, &broadcaster).await;

        // Reading on flushes the echo of a peer's close frame.
        while let Ok(Some(Ok(ReceivedSignal::Closed))) =
            timeout(CLOSE_HANDSHAKE_TIMEOUT, inbound.next()).await
        {}

        info!("{} has left room {}", username, room_id);
    }

    fn read_signal(
        result: Result<Message, axum::Error>,
    ) -> Option<Result<ReceivedSignal, ReceiveError>> {
        let signal = match result {
            Ok(Message::Text(text)) => SignalMessage::from_text(text.as_str())
                .map(ReceivedSignal::Message)
                .map_err(ReceiveError::from),
            Ok(Message::Binary(bytes)) => SignalMessage::from_slice(&bytes)
                .map(ReceivedSignal::Message)
                .map_err(ReceiveError::from),
            Ok(Message::Close(_)) => Ok(ReceivedSignal::Closed),
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => return None,
            Err(e) => Err(ReceiveError::Transport(e.to_string())),
        };

        Some(signal)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn text_frames_become_messages() {
        let signal = WsHandler::read_signal(Ok(Message::Text(r#"{"ping":1}"#.into())));

        let expected: SignalMessage = serde_json::from_value(json!({"ping": 1})).unwrap();
        assert_eq!(signal.unwrap().unwrap(), ReceivedSignal::Message(expected));
    }

    #[test]
    fn binary_frames_are_parsed_too() {
        let signal = WsHandler::read_signal(Ok(Message::Binary(
            br#"{"type":"candidate"}"#.to_vec().into(),
        )));

        assert!(matches!(signal, Some(Ok(ReceivedSignal::Message(_)))));
    }

    #[test]
    fn malformed_payload_is_a_receive_error() {
        let signal = WsHandler::read_signal(Ok(Message::Text("not json".into())));

        assert!(matches!(signal, Some(Err(ReceiveError::Malformed(_)))));
    }

    #[test]
    fn close_frame_closes() {
        let signal = WsHandler::read_signal(Ok(Message::Close(None)));

        assert!(matches!(signal, Some(Ok(ReceivedSignal::Closed))));
    }

    #[test]
    fn ping_frames_are_skipped() {
        assert!(WsHandler::read_signal(Ok(Message::Ping(Vec::new().into()))).is_none());
        assert!(WsHandler::read_signal(Ok(Message::Pong(Vec::new().into()))).is_none());
    }
}
