//! Usecase layer.
//!
//! One usecase per inbound protocol transition, plus the broadcast
//! engine they share. Usecases are cheap to construct and are built
//! fresh from the shared state for every event.

pub mod broadcast;
pub mod disconnect;
pub mod join_room;
pub mod send_message;

pub use broadcast::Broadcaster;
pub use disconnect::DisconnectUseCase;
pub use join_room::JoinRoomUseCase;
pub use send_message::SendMessageUseCase;
