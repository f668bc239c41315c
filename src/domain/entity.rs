//! Core domain models for the chat relay.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of messages retained per room; oldest entries are
/// evicted first on overflow.
pub const HISTORY_CAP: usize = 100;

/// Server-generated identifier for one live connection.
///
/// Connections carry no client-supplied identity; the relay only needs a
/// stable handle to correlate registry entries across a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A chat message. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub username: String,
    pub text: String,
}

/// One room member: a connection and the display name it joined under.
///
/// Display names are labels only; they are not unique within a room and
/// not authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub conn: ConnectionId,
    pub username: String,
}

/// A named broadcast domain holding members and a bounded message history.
///
/// Member order is join order; history order is append order with the
/// most recent message last.
#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub members: Vec<Member>,
    pub messages: Vec<ChatMessage>,
    /// Unix timestamp (milliseconds) when the room was created
    pub created_at: i64,
}

impl Room {
    /// Create a new empty room.
    pub fn new(name: impl Into<String>, created_at: i64) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            messages: Vec::new(),
            created_at,
        }
    }

    /// Add a member, or update its display name in place if the
    /// connection is already present (re-join of the same room).
    pub fn upsert_member(&mut self, conn: ConnectionId, username: impl Into<String>) {
        let username = username.into();
        match self.members.iter_mut().find(|m| m.conn == conn) {
            Some(member) => member.username = username,
            None => self.members.push(Member { conn, username }),
        }
    }

    /// Remove a member, returning its display name if it was present.
    pub fn remove_member(&mut self, conn: ConnectionId) -> Option<String> {
        let idx = self.members.iter().position(|m| m.conn == conn)?;
        Some(self.members.remove(idx).username)
    }

    /// Member display names in join order.
    pub fn member_names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.username.clone()).collect()
    }

    /// Member connections in join order.
    pub fn member_connections(&self) -> Vec<ConnectionId> {
        self.members.iter().map(|m| m.conn).collect()
    }

    /// Append a message, evicting the oldest entries so at most
    /// [`HISTORY_CAP`] remain.
    pub fn push_message(&mut self, message: ChatMessage) {
        self.messages.push(message);
        if self.messages.len() > HISTORY_CAP {
            let excess = self.messages.len() - HISTORY_CAP;
            self.messages.drain(..excess);
        }
    }
}

/// Snapshot of one room for the HTTP room listing.
#[derive(Debug, Clone)]
pub struct RoomSummary {
    pub name: String,
    pub users: Vec<String>,
    pub created_at: i64,
}
