//! Real-time chat relay.
//!
//! Clients connect over WebSocket, join named rooms, and exchange short
//! text messages broadcast to every room member. Rooms keep a bounded
//! in-memory message history; nothing is persisted across restarts.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logger;
pub mod time;
pub mod ui;
pub mod usecase;

// Re-export entry point
pub use ui::run_server;
