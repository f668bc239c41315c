//! Error definitions.
//!
//! Protocol-level failures (malformed payloads, unknown rooms, dead
//! peers) are absorbed where they occur and never surface as errors, so
//! the only error type here is the one the server entry point returns.

use thiserror::Error;

/// Fatal server errors surfaced by `run_server`.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listener could not be bound
    #[error("failed to bind listener: {0}")]
    Bind(#[source] std::io::Error),

    /// The accept loop failed
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
