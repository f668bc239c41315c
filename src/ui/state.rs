//! Server state.

use std::sync::Arc;

use crate::{
    domain::{ConnectionRegistry, RoomRegistry},
    infrastructure::registry::{InMemoryConnectionRegistry, InMemoryRoomRegistry},
};

/// Shared application state: the single owner of both registries.
///
/// Constructed once per server (and fresh per test), then handed to every
/// handler — registry state never lives at process scope.
pub struct AppState {
    /// Room name → members and message history
    pub rooms: Arc<dyn RoomRegistry>,
    /// Live connections and their current room
    pub connections: Arc<dyn ConnectionRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(InMemoryRoomRegistry::new()),
            connections: Arc::new(InMemoryConnectionRegistry::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
