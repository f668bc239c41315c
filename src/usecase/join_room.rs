//! Usecase: joining (or switching to) a room.
//!
//! `switch_room` is join-with-implicit-leave: the client sends a
//! different event type but the transition is re-run wholesale, full
//! `init` payload included.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::{
    domain::{ConnectionId, ConnectionRegistry, RoomRegistry},
    infrastructure::dto::ws::ServerEvent,
    usecase::Broadcaster,
};

/// Executes the join transition for one connection.
pub struct JoinRoomUseCase {
    rooms: Arc<dyn RoomRegistry>,
    connections: Arc<dyn ConnectionRegistry>,
}

impl JoinRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRegistry>, connections: Arc<dyn ConnectionRegistry>) -> Self {
        Self { rooms, connections }
    }

    /// Register the connection in `room` under `username` and notify
    /// everyone affected.
    ///
    /// Sequence: create the room if needed (announcing new rooms to every
    /// tracked connection exactly once), leave the previous room if it
    /// differs, register membership, send the joiner its `init` snapshot,
    /// then announce the arrival and the updated user list to the room.
    pub async fn execute(
        &self,
        conn: ConnectionId,
        username: String,
        room: String,
        sender: UnboundedSender<String>,
    ) {
        let broadcaster = Broadcaster::new(self.rooms.clone(), self.connections.clone());

        let created = self.rooms.ensure_room(&room).await;
        if created {
            broadcaster.broadcast_rooms_list().await;
        }

        // Leave the previous room, if any. Re-joining the current room
        // only refreshes the display name and sends no leave notice.
        if let Some(previous) = self.connections.get_room(conn).await
            && previous != room
        {
            if let Some(old_username) = self.rooms.remove_member(&previous, conn).await {
                let notice = ServerEvent::system(format!("{old_username} has left the room."));
                broadcaster.broadcast_to_room(&previous, &notice).await;
            }
            broadcaster.broadcast_user_list(&previous).await;
        }

        self.rooms.add_member(&room, conn, &username).await;
        self.connections.set_room(conn, &room).await;
        self.connections.track(conn, sender.clone()).await;
        tracing::info!(%conn, room, username, "connection joined room");

        // Initial state for the joiner: history, members, all rooms
        let init = ServerEvent::Init {
            room: room.clone(),
            messages: self.rooms.history(&room).await,
            users: self.rooms.member_names(&room).await,
            rooms: self.rooms.list_rooms().await,
        };
        if sender.send(init.to_payload()).is_err() {
            // The joiner died mid-join; the next broadcast prunes it
            tracing::debug!(%conn, "failed to deliver init payload");
        }

        let notice = ServerEvent::system(format!("{username} has joined the room."));
        broadcaster.broadcast_to_room(&room, &notice).await;
        broadcaster.broadcast_user_list(&room).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::registry::{InMemoryConnectionRegistry, InMemoryRoomRegistry};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Fixture {
        rooms: Arc<InMemoryRoomRegistry>,
        connections: Arc<InMemoryConnectionRegistry>,
        usecase: JoinRoomUseCase,
    }

    fn fixture() -> Fixture {
        let rooms = Arc::new(InMemoryRoomRegistry::new());
        let connections = Arc::new(InMemoryConnectionRegistry::new());
        let usecase = JoinRoomUseCase::new(rooms.clone(), connections.clone());
        Fixture {
            rooms,
            connections,
            usecase,
        }
    }

    fn drain(rx: &mut UnboundedReceiver<String>) -> Vec<serde_json::Value> {
        let mut events = Vec::new();
        while let Ok(payload) = rx.try_recv() {
            events.push(serde_json::from_str(&payload).unwrap());
        }
        events
    }

    #[tokio::test]
    async fn test_first_join_sends_init_then_announcements() {
        // given:
        let f = fixture();
        let conn = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when: Alice joins an empty room
        f.usecase
            .execute(conn, "Alice".to_string(), "general".to_string(), tx)
            .await;

        // then: init with empty history, herself as only user, and the
        // room present in the room list; then the join notice and users
        let events = drain(&mut rx);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["type"], "init");
        assert_eq!(events[0]["room"], "general");
        assert_eq!(events[0]["messages"], serde_json::json!([]));
        assert_eq!(events[0]["users"], serde_json::json!(["Alice"]));
        assert_eq!(events[1]["type"], "system");
        assert_eq!(events[1]["message"], "Alice has joined the room.");
        assert_eq!(events[2]["type"], "users");
        assert!(
            events[0]["rooms"]
                .as_array()
                .unwrap()
                .contains(&serde_json::json!("general"))
        );

        // and: both registries agree on membership
        assert_eq!(f.connections.get_room(conn).await.as_deref(), Some("general"));
        assert_eq!(f.rooms.member_names("general").await, vec!["Alice"]);
    }

    #[tokio::test]
    async fn test_second_join_announces_to_existing_member() {
        // given: Alice already in the room
        let f = fixture();
        let alice = ConnectionId::generate();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(alice, "Alice".to_string(), "general".to_string(), alice_tx)
            .await;
        drain(&mut alice_rx);

        // when: Bob joins the same room
        let bob = ConnectionId::generate();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(bob, "Bob".to_string(), "general".to_string(), bob_tx)
            .await;

        // then: Alice sees the arrival and the join-ordered user list,
        // and no rooms broadcast since the room already existed
        let alice_events = drain(&mut alice_rx);
        assert_eq!(alice_events.len(), 2);
        assert_eq!(alice_events[0]["type"], "system");
        assert_eq!(alice_events[0]["message"], "Bob has joined the room.");
        assert_eq!(alice_events[1]["type"], "users");
        assert_eq!(alice_events[1]["users"], serde_json::json!(["Alice", "Bob"]));

        // and: Bob's init lists both members
        let bob_events = drain(&mut bob_rx);
        assert_eq!(bob_events[0]["type"], "init");
        assert_eq!(bob_events[0]["users"], serde_json::json!(["Alice", "Bob"]));
    }

    #[tokio::test]
    async fn test_new_room_broadcasts_rooms_list_once() {
        // given: Alice tracked in "general"
        let f = fixture();
        let alice = ConnectionId::generate();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(alice, "Alice".to_string(), "general".to_string(), alice_tx)
            .await;
        drain(&mut alice_rx);

        // when: Bob creates a brand-new room
        let bob = ConnectionId::generate();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(bob, "Bob".to_string(), "random".to_string(), bob_tx)
            .await;

        // then: Alice receives exactly one rooms event and nothing else
        let alice_events = drain(&mut alice_rx);
        assert_eq!(alice_events.len(), 1);
        assert_eq!(alice_events[0]["type"], "rooms");
        assert_eq!(
            alice_events[0]["rooms"],
            serde_json::json!(["general", "random"])
        );

        // and: Bob, not yet tracked at creation time, got no rooms
        // event — his init carries the list instead
        let bob_events = drain(&mut bob_rx);
        assert_eq!(bob_events[0]["type"], "init");

        // when: a third member joins the existing room
        let carol = ConnectionId::generate();
        let (carol_tx, _carol_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(carol, "Carol".to_string(), "general".to_string(), carol_tx)
            .await;

        // then: no rooms broadcast for an existing room
        let alice_events = drain(&mut alice_rx);
        assert!(alice_events.iter().all(|e| e["type"] != "rooms"));
    }

    #[tokio::test]
    async fn test_switch_room_leaves_old_room() {
        // given: Alice and Bob in "general"
        let f = fixture();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        let (alice_tx, mut alice_rx) = mpsc::unbounded_channel();
        let (bob_tx, mut bob_rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(alice, "Alice".to_string(), "general".to_string(), alice_tx)
            .await;
        f.usecase
            .execute(bob, "Bob".to_string(), "general".to_string(), bob_tx.clone())
            .await;
        drain(&mut alice_rx);
        drain(&mut bob_rx);

        // when: Bob switches to "other"
        f.usecase
            .execute(bob, "Bob".to_string(), "other".to_string(), bob_tx)
            .await;

        // then: Bob no longer belongs to "general" in either registry
        assert_eq!(f.rooms.member_names("general").await, vec!["Alice"]);
        assert_eq!(f.connections.get_room(bob).await.as_deref(), Some("other"));

        // and: Alice saw the new room, the leave notice, and the
        // shrunken user list
        let events = drain(&mut alice_rx);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["type"], "rooms");
        assert_eq!(events[1]["type"], "system");
        assert_eq!(events[1]["message"], "Bob has left the room.");
        assert_eq!(events[2]["type"], "users");
        assert_eq!(events[2]["users"], serde_json::json!(["Alice"]));

        // and: Bob received a full init for the new room
        let bob_events = drain(&mut bob_rx);
        assert!(bob_events.iter().any(|e| e["type"] == "init" && e["room"] == "other"));
    }

    #[tokio::test]
    async fn test_rejoining_same_room_updates_name_without_leave() {
        // given: Alice in "general"
        let f = fixture();
        let alice = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(alice, "Alice".to_string(), "general".to_string(), tx.clone())
            .await;
        drain(&mut rx);

        // when: the same connection joins the same room under a new name
        f.usecase
            .execute(alice, "Alicia".to_string(), "general".to_string(), tx)
            .await;

        // then: single membership, updated name, no leave notice
        assert_eq!(f.rooms.member_names("general").await, vec!["Alicia"]);
        let events = drain(&mut rx);
        assert!(events.iter().all(|e| e["message"] != "Alice has left the room."));
    }

    #[tokio::test]
    async fn test_join_history_is_replayed() {
        // given: a room with history
        let f = fixture();
        f.rooms.ensure_room("general").await;
        f.rooms.append_message("general", "Alice", "hello").await;
        f.rooms.append_message("general", "Alice", "anyone?").await;

        // when: Bob joins
        let bob = ConnectionId::generate();
        let (tx, mut rx) = mpsc::unbounded_channel();
        f.usecase
            .execute(bob, "Bob".to_string(), "general".to_string(), tx)
            .await;

        // then: init replays the stored history in order
        let events = drain(&mut rx);
        assert_eq!(
            events[0]["messages"],
            serde_json::json!([
                {"username": "Alice", "text": "hello"},
                {"username": "Alice", "text": "anyone?"},
            ])
        );
    }
}
