//! Usecase: relaying a chat message to a room.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, RoomRegistry},
    infrastructure::dto::ws::ServerEvent,
    usecase::Broadcaster,
};

/// Appends a message to room history and broadcasts it.
pub struct SendMessageUseCase {
    rooms: Arc<dyn RoomRegistry>,
    connections: Arc<dyn ConnectionRegistry>,
}

impl SendMessageUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, connections: Arc<dyn ConnectionRegistry>) -> Self {
        Self { rooms, connections }
    }

    /// Append and broadcast. Messages for unknown rooms, or with an empty
    /// room, username, or text, are dropped silently; no error goes back
    /// to the sender.
    pub async fn execute(&self, room: String, username: String, text: String) {
        let Some(message) = self.rooms.append_message(&room, &username, &text).await else {
            tracing::debug!(room, username, "dropping invalid message event");
            return;
        };

        let broadcaster = Broadcaster::new(self.rooms.clone(), self.connections.clone());
        broadcaster
            .broadcast_to_room(&room, &ServerEvent::Message { message })
            .await;
    }
}
