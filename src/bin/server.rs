//! Chat relay server binary.
//!
//! Serves the WebSocket relay endpoint and the static browser client on a
//! single listener.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-relay-server
//! ```

use clap::Parser;

use chat_relay::{config::ServerConfig, logger::setup_logger};

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = ServerConfig::parse();

    // Run the server
    if let Err(e) = chat_relay::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
