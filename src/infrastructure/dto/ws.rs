//! WebSocket wire schema.
//!
//! JSON payloads tagged by a `type` field. Field names are fixed for
//! client compatibility.

use serde::{Deserialize, Serialize};

use crate::domain::ChatMessage;

fn default_username() -> String {
    "Anonymous".to_string()
}

fn default_room() -> String {
    "default".to_string()
}

/// Inbound client events.
///
/// `join` and `switch_room` carry the same fields and receive the same
/// handling; a missing username or room falls back to the documented
/// defaults. Payloads with an unrecognized `type` deserialize to
/// [`ClientEvent::Unknown`] and are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    Join {
        #[serde(default = "default_username")]
        username: String,
        #[serde(default = "default_room")]
        room: String,
    },
    Message {
        #[serde(default)]
        room: String,
        #[serde(default)]
        username: String,
        #[serde(default)]
        text: String,
    },
    SwitchRoom {
        #[serde(default = "default_username")]
        username: String,
        #[serde(default = "default_room")]
        room: String,
    },
    #[serde(other)]
    Unknown,
}

/// Outbound server events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full room state sent to a connection when it joins
    Init {
        room: String,
        messages: Vec<ChatMessage>,
        users: Vec<String>,
        rooms: Vec<String>,
    },
    /// A user chat message relayed to a room
    Message { message: ChatMessage },
    /// Server-generated notice (join/leave/disconnect)
    System { message: String },
    /// Updated member list for a room
    Users { users: Vec<String> },
    /// Updated list of all room names, sent to every tracked connection
    Rooms { rooms: Vec<String> },
}

impl ServerEvent {
    pub fn system(message: impl Into<String>) -> Self {
        Self::System {
            message: message.into(),
        }
    }

    pub fn users(users: Vec<String>) -> Self {
        Self::Users { users }
    }

    pub fn rooms(rooms: Vec<String>) -> Self {
        Self::Rooms { rooms }
    }

    /// Serialize for the wire. Outbound events contain only strings and
    /// vectors, so serialization cannot fail.
    pub fn to_payload(&self) -> String {
        serde_json::to_string(self).unwrap()
    }
}
