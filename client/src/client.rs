use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};

use crate::{
    cli_display::CliDisplay, pre_room_interface::PreRoomInterface, room_interface::RoomInterface,
};

pub struct Client {}

impl Client {
    pub async fn run(server_addr: &str, username: &str) -> Result<()> {
        let mut lines = BufReader::new(stdin()).lines();

        CliDisplay::print_welcome_message(server_addr, username);

        loop {
            let room_id_option = PreRoomInterface::run(server_addr, &mut lines).await?;

            match room_id_option {
                Some(room_id) => {
                    if !RoomInterface::run(server_addr, &room_id, username, &mut lines).await? {
                        return Ok(());
                    }
                }
                None => return Ok(()),
            };
        }
    }
}
