use std::{collections::HashMap, fmt};

use log::info;
use rand::Rng;
use shared::{ROOM_ID_ALPHABET, ROOM_ID_LENGTH, RoomID};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::connection::ConnectionHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
pub struct Participant {
    pub session_id: SessionId,
    pub name: String,
    pub is_host: bool,
    pub handle: ConnectionHandle,
}

impl fmt::Debug for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Participant")
            .field("session_id", &self.session_id)
            .field("name", &self.name)
            .field("is_host", &self.is_host)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occupancy {
    pub rooms: usize,
    pub participants: usize,
}

pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomID, Vec<Participant>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_room(&self) -> RoomID {
        let mut rooms = self.rooms.write().await;

        let room_id = loop {
            let candidate = generate_room_id();
            if !rooms.contains_key(&candidate) {
                break candidate;
            }
        };

        rooms.insert(room_id.clone(), Vec::new());
        info!("Created room: {}", room_id);

        room_id
    }

    pub async fn join(
        &self,
        room_id: &str,
        is_host: bool,
        session_id: SessionId,
        handle: ConnectionHandle,
        name: &str,
    ) {
        let mut rooms = self.rooms.write().await;

        info!("Inserting {} ({}) into room: {}", name, session_id, room_id);

        rooms.entry(room_id.to_string()).or_default().push(Participant {
            session_id,
            name: name.to_string(),
            is_host,
            handle,
        });
    }

    pub async fn leave(&self, room_id: &str, session_id: SessionId) -> Option<Participant> {
        let mut rooms = self.rooms.write().await;

        let participants = rooms.get_mut(room_id)?;

        let removed = participants
            .iter()
            .position(|participant| participant.session_id == session_id)
            .map(|index| participants.remove(index));

        if let Some(participant) = &removed {
            info!(
                "Removed {} ({}) from room: {}",
                participant.name, session_id, room_id
            );
        }

        if participants.is_empty() {
            rooms.remove(room_id);
            info!("Deleted empty room: {}", room_id);
        }

        removed
    }

    pub async fn lookup(&self, room_id: &str) -> Vec<Participant> {
        self.rooms
            .read()
            .await
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn occupancy(&self) -> Occupancy {
        let rooms = self.rooms.read().await;

        Occupancy {
            rooms: rooms.len(),
            participants: rooms.values().map(Vec::len).sum(),
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn generate_room_id() -> RoomID {
    let mut rng = rand::rng();

    (0..ROOM_ID_LENGTH)
        .map(|_| ROOM_ID_ALPHABET[rng.random_range(0..ROOM_ID_ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared::is_valid_room_id;

    use super::*;
    use crate::connection::testing::RecordingConnection;

    fn handle() -> ConnectionHandle {
        RecordingConnection::new()
    }

    #[test]
    fn generated_ids_use_the_alphabet() {
        for _ in 0..1000 {
            let room_id = generate_room_id();
            assert_eq!(room_id.len(), ROOM_ID_LENGTH);
            assert!(is_valid_room_id(&room_id), "bad room id {}", room_id);
        }
    }

    #[tokio::test]
    async fn create_room_inserts_empty_room() {
        let registry = RoomRegistry::new();

        let room_id = registry.create_room().await;

        assert!(is_valid_room_id(&room_id));
        assert_eq!(
            registry.occupancy().await,
            Occupancy {
                rooms: 1,
                participants: 0
            }
        );
        assert!(registry.lookup(&room_id).await.is_empty());
    }

    #[tokio::test]
    async fn create_room_never_reuses_a_live_id() {
        let registry = RoomRegistry::new();
        let mut ids = std::collections::HashSet::new();

        for _ in 0..500 {
            assert!(ids.insert(registry.create_room().await));
        }

        assert_eq!(registry.occupancy().await.rooms, 500);
    }

    #[tokio::test]
    async fn join_without_create_creates_room() {
        let registry = RoomRegistry::new();

        registry
            .join("AB12cd34", false, SessionId::new(), handle(), "alice")
            .await;

        let participants = registry.lookup("AB12cd34").await;
        assert_eq!(participants.len(), 1);
        assert_eq!(participants[0].name, "alice");
        assert!(!participants[0].is_host);
    }

    #[tokio::test]
    async fn join_preserves_insertion_order() {
        let registry = RoomRegistry::new();
        let room_id = registry.create_room().await;

        for name in ["alice", "bob", "carol"] {
            registry
                .join(&room_id, false, SessionId::new(), handle(), name)
                .await;
        }

        let names: Vec<String> = registry
            .lookup(&room_id)
            .await
            .into_iter()
            .map(|participant| participant.name)
            .collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn leave_matches_session_not_name() {
        let registry = RoomRegistry::new();
        let first = SessionId::new();
        let second = SessionId::new();

        registry.join("room0001", false, first, handle(), "alice").await;
        registry.join("room0001", false, second, handle(), "alice").await;

        let removed = registry.leave("room0001", second).await;

        assert_eq!(removed.map(|participant| participant.session_id), Some(second));
        let remaining = registry.lookup("room0001").await;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].session_id, first);
    }

    #[tokio::test]
    async fn last_leave_deletes_room() {
        let registry = RoomRegistry::new();
        let alice = SessionId::new();
        let bob = SessionId::new();

        registry.join("room0001", false, alice, handle(), "alice").await;
        registry.join("room0001", false, bob, handle(), "bob").await;

        registry.leave("room0001", alice).await;
        assert_eq!(registry.occupancy().await.rooms, 1);

        registry.leave("room0001", bob).await;
        assert!(registry.lookup("room0001").await.is_empty());
        assert_eq!(registry.occupancy().await, Occupancy::default());
    }

    #[tokio::test]
    async fn leave_unknown_room_or_session_is_noop() {
        let registry = RoomRegistry::new();
        let alice = SessionId::new();

        assert!(registry.leave("missing1", alice).await.is_none());

        registry.join("room0001", false, alice, handle(), "alice").await;
        assert!(registry.leave("room0001", SessionId::new()).await.is_none());
        assert_eq!(registry.lookup("room0001").await.len(), 1);
    }

    #[tokio::test]
    async fn lookup_is_a_snapshot() {
        let registry = RoomRegistry::new();
        let alice = SessionId::new();
        registry.join("room0001", false, alice, handle(), "alice").await;

        let snapshot = registry.lookup("room0001").await;
        registry.leave("room0001", alice).await;

        assert_eq!(snapshot.len(), 1);
        assert!(registry.lookup("room0001").await.is_empty());
    }

    #[tokio::test]
    async fn occupancy_counts_rooms_and_participants_together() {
        let registry = RoomRegistry::new();
        registry.create_room().await;

        for name in ["alice", "bob"] {
            registry
                .join("room0001", false, SessionId::new(), handle(), name)
                .await;
        }

        assert_eq!(
            registry.occupancy().await,
            Occupancy {
                rooms: 2,
                participants: 2
            }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_joins_are_all_recorded() {
        let registry = Arc::new(RoomRegistry::new());
        let room_id = registry.create_room().await;

        let tasks: Vec<_> = (0..64)
            .map(|i| {
                let registry = registry.clone();
                let room_id = room_id.clone();
                tokio::spawn(async move {
                    let session_id = SessionId::new();
                    registry
                        .join(&room_id, false, session_id, handle(), &format!("user-{}", i))
                        .await;
                    session_id
                })
            })
            .collect();

        let mut session_ids = Vec::new();
        for task in tasks {
            session_ids.push(task.await.unwrap());
        }

        let participants = registry.lookup(&room_id).await;
        assert_eq!(participants.len(), 64);
        for session_id in &session_ids {
            assert_eq!(
                participants
                    .iter()
                    .filter(|participant| participant.session_id == *session_id)
                    .count(),
                1
            );
        }
        assert_eq!(
            registry.occupancy().await,
            Occupancy {
                rooms: 1,
                participants: 64
            }
        );
    }
}
