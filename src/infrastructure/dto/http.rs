//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Room summary for the room list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub name: String,
    pub users: Vec<String>,
    pub created_at: String, // ISO 8601
}
