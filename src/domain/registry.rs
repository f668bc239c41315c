//! Registry traits owned by the domain layer.
//!
//! The usecase layer depends on these traits rather than on the in-memory
//! implementations (dependency inversion). Both registries must be kept
//! consistent by their callers: `ConnectionRegistry::get_room(c) == Some(r)`
//! iff `c` is a member of room `r`, for every live connection `c`.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc::UnboundedSender;

use super::entity::{ChatMessage, ConnectionId, RoomSummary};

/// Owns the mapping of room name to room state (members and history).
///
/// Every operation is a no-op rather than an error when its target is
/// absent; the relay never surfaces registry failures to clients.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Create the room if it does not exist. Returns `true` only on
    /// actual creation, never on lookup of an existing room.
    async fn ensure_room(&self, name: &str) -> bool;

    /// Add a member to a room, or update its display name if the
    /// connection is already a member. No-op if the room does not exist.
    async fn add_member(&self, room: &str, conn: ConnectionId, username: &str);

    /// Remove a member from a room, returning the removed display name.
    /// No-op returning `None` if the room or member is absent.
    async fn remove_member(&self, room: &str, conn: ConnectionId) -> Option<String>;

    /// Append a message to a room's history, evicting the oldest entries
    /// beyond the cap. Returns `None` (silent drop) when the room is
    /// unknown or the room name, username, or text is empty.
    async fn append_message(
        &self,
        room: &str,
        username: &str,
        text: &str,
    ) -> Option<ChatMessage>;

    /// All room names in creation order.
    async fn list_rooms(&self) -> Vec<String>;

    /// Member display names in join order; empty if the room is unknown.
    async fn member_names(&self, room: &str) -> Vec<String>;

    /// Member connections in join order; empty if the room is unknown.
    async fn member_connections(&self, room: &str) -> Vec<ConnectionId>;

    /// The room's message history; empty if the room is unknown.
    async fn history(&self, room: &str) -> Vec<ChatMessage>;

    /// Per-room snapshots for the HTTP room listing, in creation order.
    async fn summaries(&self) -> Vec<RoomSummary>;
}

/// Tracks every live connection and which room (if any) it occupies.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Register a connection and its outbound channel in the global set.
    /// Tracking an already-tracked connection replaces its sender.
    async fn track(&self, conn: ConnectionId, sender: UnboundedSender<String>);

    /// Remove a connection from the global set. Idempotent.
    async fn untrack(&self, conn: ConnectionId);

    /// Record the connection's current room, overwriting any prior value.
    async fn set_room(&self, conn: ConnectionId, room: &str);

    /// The connection's current room, if it has joined one.
    async fn get_room(&self, conn: ConnectionId) -> Option<String>;

    /// Remove the connection's room mapping. Idempotent.
    async fn clear_room(&self, conn: ConnectionId);

    /// The connection's outbound channel, if it is tracked.
    async fn sender(&self, conn: ConnectionId) -> Option<UnboundedSender<String>>;

    /// Snapshot of every tracked connection and its outbound channel.
    async fn all_senders(&self) -> Vec<(ConnectionId, UnboundedSender<String>)>;
}
