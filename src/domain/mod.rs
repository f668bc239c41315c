//! Domain layer for the chat relay.
//!
//! Business rules that are independent of the wire format and of the
//! in-memory storage: rooms, members, the bounded message history, and
//! the registry traits the usecase layer depends on.

pub mod entity;
pub mod error;
pub mod registry;

pub use entity::{ChatMessage, ConnectionId, Member, Room, RoomSummary, HISTORY_CAP};
pub use error::ServerError;
pub use registry::{ConnectionRegistry, RoomRegistry};

#[cfg(test)]
pub use registry::{MockConnectionRegistry, MockRoomRegistry};
