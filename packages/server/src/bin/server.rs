//! Genkan room chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin genkan-server
//! cargo run --bin genkan-server -- --host 0.0.0.0 --port 3000 --history-limit 500
//! ```

use std::sync::Arc;

use clap::Parser;
use genkan_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{DEFAULT_HISTORY_LIMIT, InMemoryPresenceRegistry, InMemoryRoomRepository},
    },
    ui::{AppState, Server},
};
use genkan_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "genkan-server")]
#[command(about = "Room chat server where an admin lets people in", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Maximum number of messages kept per room
    #[arg(long, default_value_t = DEFAULT_HISTORY_LIMIT)]
    history_limit: usize,

    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("genkan_server", env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository and Presence Registry
    // 2. MessagePusher
    // 3. AppState (UseCases)
    // 4. Server

    // 1. Create Repository and Presence Registry (in-memory)
    let repository = Arc::new(InMemoryRoomRepository::new(
        Arc::new(SystemClock),
        args.history_limit,
    ));
    let presence = Arc::new(InMemoryPresenceRegistry::new());
    tracing::info!("Keeping up to {} message(s) per room", args.history_limit);

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let state = AppState::new(repository, presence, message_pusher);

    // 4. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
