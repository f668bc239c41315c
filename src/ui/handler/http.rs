//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::http::RoomSummaryDto, time::timestamp_to_rfc3339, ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get the list of rooms with their current members
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let summaries = state.rooms.summaries().await;

    let rooms = summaries
        .into_iter()
        .map(|summary| RoomSummaryDto {
            name: summary.name,
            users: summary.users,
            created_at: timestamp_to_rfc3339(summary.created_at),
        })
        .collect();

    Json(rooms)
}
