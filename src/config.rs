//! Server configuration parsed from the command line.

use std::path::PathBuf;

use clap::Parser;

/// Command-line configuration for the relay server.
#[derive(Debug, Clone, Parser)]
#[command(name = "chat-relay-server", version, about = "Real-time chat relay server")]
pub struct ServerConfig {
    /// Address to bind the listener on
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on (WebSocket and HTTP share the listener)
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    /// Directory of static client assets served at the root path
    #[arg(long, default_value = "client")]
    pub static_dir: PathBuf,
}
