//! UI layer: HTTP/WebSocket endpoints and the server runner.

pub mod handler;
pub mod runner;
pub mod signal;
pub mod state;

pub use runner::{app, run_server};
pub use state::AppState;
