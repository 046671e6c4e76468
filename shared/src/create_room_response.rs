use serde::{Deserialize, Serialize};

use crate::RoomID;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub room_id: RoomID,
}
