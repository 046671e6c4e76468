use anyhow::{Result, bail};
use shared::{CREATE_PATH, RoomID, create_room_response::CreateRoomResponse};
use tokio::io::{AsyncBufRead, Lines};

use crate::cli_display::CliDisplay;

pub struct PreRoomInterface;

impl PreRoomInterface {
    pub async fn run<R>(server_addr: &str, lines: &mut Lines<R>) -> Result<Option<RoomID>>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            CliDisplay::print_prompt();

            let line = match lines.next_line().await? {
                Some(line) => line,
                None => return Ok(None),
            };

            let line = line.trim();

            if line == "exit" {
                println!("Exiting...");
                return Ok(None);
            }

            if let Some(room_id) = Self::handle_user_input(server_addr, line).await? {
                return Ok(Some(room_id));
            }
        }
    }

    async fn handle_user_input(server_addr: &str, input: &str) -> Result<Option<RoomID>> {
        match input {
            "" => {}

            "create room" => match create_room(server_addr).await {
                Ok(room_id) => CliDisplay::print_room_created(&room_id),
                Err(e) => eprintln!("Could not create room: {}", e),
            },

            "join room" => {
                eprintln!("Usage: join room <id>");
            }
            command if command.starts_with("join room ") => {
                let command_parts: Vec<&str> = command.split_whitespace().collect();

                if command_parts.len() != 3 {
                    eprintln!("Usage: join room <id>");
                } else {
                    return Ok(Some(command_parts[2].to_string()));
                }
            }

            _ => {
                eprintln!("Unknown command");
            }
        }

        Ok(None)
    }
}

async fn create_room(server_addr: &str) -> Result<RoomID> {
    let response = reqwest::get(format!("http://{}{}", server_addr, CREATE_PATH)).await?;

    if !response.status().is_success() {
        bail!("server responded with {}", response.status());
    }

    let body: CreateRoomResponse = response.json().await?;

    Ok(body.room_id)
}
