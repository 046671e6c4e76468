use std::io::{Write, stdout};

use chrono::Local;
use shared::signal_message::SignalMessage;

pub const PROMPT_STR: &str = "> ";

pub struct CliDisplay;

impl CliDisplay {
    pub fn print_welcome_message(server_addr: &str, username: &str) {
        println!("Using server {} as '{}'", server_addr, username);
        println!("Commands: create room | join room <id> | exit");
    }

    pub fn print_prompt() {
        let mut stdout = stdout();

        let _ = write!(stdout, "{}", PROMPT_STR);
        let _ = stdout.flush();
    }

    pub fn print_room_created(room_id: &str) {
        println!("Created room '{}'", room_id);
    }

    pub fn print_joined_room(room_id: &str, username: &str) {
        println!("Joined '{}' as '{}'", room_id, username);
        println!("Type a JSON object to send it, or 'leave' to go back.");
    }

    pub fn print_incoming(message: &SignalMessage) {
        let timestamp = Local::now().format("%H:%M:%S");

        if message.is_join_announcement() {
            println!("[{}] a participant joined", timestamp);
        } else {
            println!("[{}] {}", timestamp, message.to_text());
        }
    }

    pub fn print_left_room(room_id: &str) {
        println!("You have left '{}'", room_id);
    }

    pub fn print_disconnected(room_id: &str) {
        println!("Disconnected from '{}'", room_id);
    }
}
