//! Usecase: cleaning up after a closed connection.

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, RoomRegistry},
    infrastructure::dto::ws::ServerEvent,
    usecase::Broadcaster,
};

/// Removes a connection from both registries and notifies its room.
///
/// Runs once per session after the socket tasks finish, whatever the exit
/// path (clean close, read error, or peer vanishing). Every step is a
/// no-op on absent entries, so racing with broadcast-side pruning is
/// harmless.
pub struct DisconnectUseCase {
    rooms: Arc<dyn RoomRegistry>,
    connections: Arc<dyn ConnectionRegistry>,
}

impl DisconnectUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, connections: Arc<dyn ConnectionRegistry>) -> Self {
        Self { rooms, connections }
    }

    pub async fn execute(&self, conn: ConnectionId) {
        let room = self.connections.get_room(conn).await;
        self.connections.clear_room(conn).await;
        self.connections.untrack(conn).await;

        let Some(room) = room else {
            return;
        };

        if let Some(username) = self.rooms.remove_member(&room, conn).await {
            tracing::info!(%conn, room, username, "connection left room");
            let broadcaster = Broadcaster::new(self.rooms.clone(), self.connections.clone());
            let notice = ServerEvent::system(format!("{username} has left the room."));
            broadcaster.broadcast_to_room(&room, &notice).await;
            broadcaster.broadcast_user_list(&room).await;
        }
    }
}
