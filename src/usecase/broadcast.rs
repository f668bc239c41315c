//! Broadcast engine.
//!
//! Best-effort fan-out of one event to a set of connections. Broadcast is
//! also the relay's only failure-detection point: there is no ping
//! subsystem, so a dead peer is discovered when a send to it fails, and
//! every broadcast path doubles as cleanup.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, RoomRegistry},
    infrastructure::dto::ws::ServerEvent,
};

/// Delivers events to room members or to every tracked connection,
/// pruning dead connections as a side effect.
pub struct Broadcaster {
    rooms: Arc<dyn RoomRegistry>,
    connections: Arc<dyn ConnectionRegistry>,
}

impl Broadcaster {
    pub fn new(rooms: Arc<dyn RoomRegistry>, connections: Arc<dyn ConnectionRegistry>) -> Self {
        Self { rooms, connections }
    }

    /// Send `event` to every member of `room`.
    ///
    /// Failed sends mark the connection dead. Dead connections are
    /// processed in a post-send worklist rather than recursively: each is
    /// removed from the room and the connection registry, then — if it
    /// had a display name — a disconnect notice and an updated user list
    /// go out to the already-pruned room. Those secondary sends may
    /// discover further dead connections, which join the worklist; the
    /// member list shrinks monotonically, so the pass terminates.
    pub async fn broadcast_to_room(&self, room: &str, event: &ServerEvent) {
        let mut dead = self.send_to_members(room, &event.to_payload()).await;

        while let Some(conn) = dead.pop() {
            let username = self.rooms.remove_member(room, conn).await;
            self.connections.clear_room(conn).await;
            self.connections.untrack(conn).await;

            if let Some(name) = username {
                tracing::info!(%conn, room, username = %name, "pruned dead connection");
                let notice = ServerEvent::system(format!("{name} disconnected unexpectedly."));
                dead.extend(self.send_to_members(room, &notice.to_payload()).await);
            }

            let users = ServerEvent::users(self.rooms.member_names(room).await);
            dead.extend(self.send_to_members(room, &users.to_payload()).await);
        }
    }

    /// Send the room's current member names to everyone in it.
    pub async fn broadcast_user_list(&self, room: &str) {
        let users = self.rooms.member_names(room).await;
        self.broadcast_to_room(room, &ServerEvent::users(users))
            .await;
    }

    /// Send the full room list to every tracked connection, joined or
    /// not. A failed send only untracks the connection; it may not belong
    /// to any room, so there is no cascading system message here.
    pub async fn broadcast_rooms_list(&self) {
        let rooms = self.rooms.list_rooms().await;
        let payload = ServerEvent::rooms(rooms).to_payload();

        for (conn, sender) in self.connections.all_senders().await {
            if sender.send(payload.clone()).is_err() {
                self.connections.untrack(conn).await;
            }
        }
    }

    /// One fan-out pass over the room's current members. The member
    /// snapshot is copied out of the registry before sending, so no
    /// registry lock is held across a send. Returns the connections whose
    /// sends failed.
    async fn send_to_members(&self, room: &str, payload: &str) -> Vec<ConnectionId> {
        let members = self.rooms.member_connections(room).await;
        let mut dead = Vec::new();

        for conn in members {
            let delivered = match self.connections.sender(conn).await {
                Some(sender) => sender.send(payload.to_string()).is_ok(),
                // A member without a tracked sender is already gone
                None => false,
            };
            if !delivered {
                dead.push(conn);
            }
        }

        dead
    }
}
