use anyhow::Result;
use futures::{SinkExt, StreamExt};
use reqwest::Url;
use shared::{
    JOIN_PATH, ROOM_ID_QUERY_PARAM, USERNAME_QUERY_PARAM, received_signal::ReceivedSignal,
    signal_message::SignalMessage,
};
use tokio::io::{AsyncBufRead, Lines};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::cli_display::CliDisplay;

pub struct RoomInterface;

impl RoomInterface {
    /// Returns `false` once stdin is exhausted.
    pub async fn run<R>(
        server_addr: &str,
        room_id: &str,
        username: &str,
        lines: &mut Lines<R>,
    ) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
    {
        let url = join_url(server_addr, room_id, username)?;
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        let (mut sink, mut stream) = ws_stream.split();

        CliDisplay::print_joined_room(room_id, username);

        let mut reader_task = tokio::spawn(async move {
            while let Some(result) = stream.next().await {
                match read_signal(result) {
                    Some(ReceivedSignal::Message(message)) => CliDisplay::print_incoming(&message),
                    Some(ReceivedSignal::Closed) => break,
                    None => {}
                }
            }
        });

        let stdin_open = loop {
            tokio::select! {

                _ = &mut reader_task => {

                    CliDisplay::print_disconnected(room_id);
                    return Ok(true);
                }

                line = lines.next_line() => {

                    let line = match line? {
                        Some(line) => line,
                        None => break false,
                    };

                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line == "leave" {
                        break true;
                    }

                    match SignalMessage::from_text(line) {
                        Ok(message) => sink.send(Message::Text(message.to_text().into())).await?,
                        Err(_) => eprintln!("Messages must be JSON objects"),
                    }
                }
            }
        };

        let _ = sink.close().await;
        reader_task.abort();
        CliDisplay::print_left_room(room_id);

        Ok(stdin_open)
    }
}

fn join_url(server_addr: &str, room_id: &str, username: &str) -> Result<Url> {
    let mut url = Url::parse(&format!("ws://{}{}", server_addr, JOIN_PATH))?;

    url.query_pairs_mut()
        .append_pair(ROOM_ID_QUERY_PARAM, room_id)
        .append_pair(USERNAME_QUERY_PARAM, username);

    Ok(url)
}

fn read_signal(
    result: Result<Message, tokio_tungstenite::tungstenite::Error>,
) -> Option<ReceivedSignal> {
    match result {
        Ok(Message::Text(text)) => SignalMessage::from_text(text.as_str())
            .ok()
            .map(ReceivedSignal::Message),
        Ok(Message::Close(_)) | Err(_) => Some(ReceivedSignal::Closed),
        Ok(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_encodes_query() {
        let url = join_url("127.0.0.1:8000", "AB12cd34", "ada lovelace").unwrap();

        assert_eq!(
            url.as_str(),
            "ws://127.0.0.1:8000/join?roomID=AB12cd34&username=ada+lovelace"
        );
    }

    #[test]
    fn close_and_errors_end_the_reader() {
        assert_eq!(
            read_signal(Ok(Message::Close(None))),
            Some(ReceivedSignal::Closed)
        );
        assert_eq!(
            read_signal(Ok(Message::Text(r#"{"join":true}"#.into()))),
            Some(ReceivedSignal::Message(SignalMessage::join_announcement()))
        );
        assert_eq!(read_signal(Ok(Message::Text("garbage".into()))), None);
    }
}
