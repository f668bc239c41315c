//! WebSocket connection handler: the per-connection session loop.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::ConnectionId,
    infrastructure::dto::ws::ClientEvent,
    ui::state::AppState,
    usecase::{DisconnectUseCase, JoinRoomUseCase, SendMessageUseCase},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Drive one connection from upgrade to cleanup.
///
/// The socket is split: a forwarding task drains the connection's mpsc
/// channel into the sink (so broadcasts from other sessions never block
/// on this socket), while the receive loop dispatches inbound events.
/// When either task finishes the other is aborted and disconnect cleanup
/// runs exactly once.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let conn = ConnectionId::generate();
    tracing::debug!(%conn, "websocket session opened");

    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();

    // Forward queued outbound payloads to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if sink.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    let recv_state = state.clone();
    let event_tx = tx.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!(%conn, "websocket read error: {}", e);
                    break;
                }
            };

            match frame {
                Message::Text(text) => {
                    dispatch_event(&recv_state, conn, &text, &event_tx).await;
                }
                Message::Close(_) => {
                    tracing::debug!(%conn, "client requested close");
                    break;
                }
                // Ping/pong handled by the protocol layer; binary ignored
                _ => {}
            }
        }
    });

    // If either task completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    // Cleanup on disconnect, whatever the exit path
    DisconnectUseCase::new(state.rooms.clone(), state.connections.clone())
        .execute(conn)
        .await;
    tracing::debug!(%conn, "websocket session closed");
}

/// Parse one inbound frame and run the matching transition.
///
/// Malformed payloads are logged and ignored; unknown event types are
/// ignored silently. Neither closes the connection or answers the sender.
async fn dispatch_event(
    state: &Arc<AppState>,
    conn: ConnectionId,
    text: &str,
    tx: &mpsc::UnboundedSender<String>,
) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(%conn, "ignoring malformed payload: {}", e);
            return;
        }
    };

    match event {
        // switch_room behaves like join: leave the old room implicitly
        ClientEvent::Join { username, room } | ClientEvent::SwitchRoom { username, room } => {
            JoinRoomUseCase::new(state.rooms.clone(), state.connections.clone())
                .execute(conn, username, room, tx.clone())
                .await;
        }
        ClientEvent::Message {
            room,
            username,
            text,
        } => {
            SendMessageUseCase::new(state.rooms.clone(), state.connections.clone())
                .execute(room, username, text)
                .await;
        }
        ClientEvent::Unknown => {
            tracing::debug!(%conn, "ignoring unknown event type");
        }
    }
}
