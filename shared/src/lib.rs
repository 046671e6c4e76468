pub mod create_room_response;
pub mod received_signal;
pub mod signal_message;

pub const DEFAULT_PORT: u16 = 8000;

pub const CREATE_PATH: &str = "/create";
pub const JOIN_PATH: &str = "/join";
pub const HEALTH_PATH: &str = "/health";

pub const ROOM_ID_QUERY_PARAM: &str = "roomID";
pub const USERNAME_QUERY_PARAM: &str = "username";

pub const ROOM_ID_LENGTH: usize = 8;
pub const ROOM_ID_ALPHABET: &[u8; 62] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ1234567890";

pub type RoomID = String;

pub fn is_valid_room_id(room_id: &str) -> bool {
    room_id.len() == ROOM_ID_LENGTH && room_id.bytes().all(|b| ROOM_ID_ALPHABET.contains(&b))
}
