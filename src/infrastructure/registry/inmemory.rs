//! In-memory registry implementations.
//!
//! HashMap tables behind a `tokio::sync::Mutex`. All state lives in
//! memory; nothing survives a restart. Each method takes the lock once,
//! mutates or snapshots, and releases it before returning, so no lock is
//! ever held across a send.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc::UnboundedSender};

use crate::{
    domain::{ChatMessage, ConnectionId, ConnectionRegistry, Room, RoomRegistry, RoomSummary},
    time::unix_timestamp_ms,
};

#[derive(Default)]
struct RoomTable {
    rooms: HashMap<String, Room>,
    /// Room names in creation order, so room listings are deterministic
    order: Vec<String>,
}

/// In-memory [`RoomRegistry`].
///
/// Rooms are created lazily on first join and never deleted; a room with
/// zero members persists and keeps appearing in listings.
#[derive(Default)]
pub struct InMemoryRoomRegistry {
    table: Mutex<RoomTable>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn ensure_room(&self, name: &str) -> bool {
        let mut table = self.table.lock().await;
        if table.rooms.contains_key(name) {
            return false;
        }
        table
            .rooms
            .insert(name.to_string(), Room::new(name, unix_timestamp_ms()));
        table.order.push(name.to_string());
        tracing::info!(room = name, "room created");
        true
    }

    async fn add_member(&self, room: &str, conn: ConnectionId, username: &str) {
        let mut table = self.table.lock().await;
        if let Some(room) = table.rooms.get_mut(room) {
            room.upsert_member(conn, username);
        }
    }

    async fn remove_member(&self, room: &str, conn: ConnectionId) -> Option<String> {
        let mut table = self.table.lock().await;
        table.rooms.get_mut(room)?.remove_member(conn)
    }

    async fn append_message(
        &self,
        room: &str,
        username: &str,
        text: &str,
    ) -> Option<ChatMessage> {
        if room.is_empty() || username.is_empty() || text.is_empty() {
            return None;
        }
        let mut table = self.table.lock().await;
        let room = table.rooms.get_mut(room)?;
        let message = ChatMessage {
            username: username.to_string(),
            text: text.to_string(),
        };
        room.push_message(message.clone());
        Some(message)
    }

    async fn list_rooms(&self) -> Vec<String> {
        self.table.lock().await.order.clone()
    }

    async fn member_names(&self, room: &str) -> Vec<String> {
        let table = self.table.lock().await;
        table
            .rooms
            .get(room)
            .map(Room::member_names)
            .unwrap_or_default()
    }

    async fn member_connections(&self, room: &str) -> Vec<ConnectionId> {
        let table = self.table.lock().await;
        table
            .rooms
            .get(room)
            .map(Room::member_connections)
            .unwrap_or_default()
    }

    async fn history(&self, room: &str) -> Vec<ChatMessage> {
        let table = self.table.lock().await;
        table
            .rooms
            .get(room)
            .map(|r| r.messages.clone())
            .unwrap_or_default()
    }

    async fn summaries(&self) -> Vec<RoomSummary> {
        let table = self.table.lock().await;
        table
            .order
            .iter()
            .filter_map(|name| table.rooms.get(name))
            .map(|room| RoomSummary {
                name: room.name.clone(),
                users: room.member_names(),
                created_at: room.created_at,
            })
            .collect()
    }
}

#[derive(Default)]
struct ConnectionTable {
    senders: HashMap<ConnectionId, UnboundedSender<String>>,
    rooms: HashMap<ConnectionId, String>,
}

/// In-memory [`ConnectionRegistry`].
#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    table: Mutex<ConnectionTable>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn track(&self, conn: ConnectionId, sender: UnboundedSender<String>) {
        self.table.lock().await.senders.insert(conn, sender);
    }

    async fn untrack(&self, conn: ConnectionId) {
        self.table.lock().await.senders.remove(&conn);
    }

    async fn set_room(&self, conn: ConnectionId, room: &str) {
        self.table.lock().await.rooms.insert(conn, room.to_string());
    }

    async fn get_room(&self, conn: ConnectionId) -> Option<String> {
        self.table.lock().await.rooms.get(&conn).cloned()
    }

    async fn clear_room(&self, conn: ConnectionId) {
        self.table.lock().await.rooms.remove(&conn);
    }

    async fn sender(&self, conn: ConnectionId) -> Option<UnboundedSender<String>> {
        self.table.lock().await.senders.get(&conn).cloned()
    }

    async fn all_senders(&self) -> Vec<(ConnectionId, UnboundedSender<String>)> {
        self.table
            .lock()
            .await
            .senders
            .iter()
            .map(|(conn, sender)| (*conn, sender.clone()))
            .collect()
    }
}
