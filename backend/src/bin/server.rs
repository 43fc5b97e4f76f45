//! FloatChat HTTP Server Binary
//!
//! This is the main entry point for the FloatChat REST API server.
//! It loads the configuration, restores the chat history, sets up the HTTP
//! router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Offline, with the echo provider (default)
//! cargo run --bin floatchat-server
//!
//! # OpenAI-compatible provider
//! FLOATCHAT_PROVIDER=openai OPENAI_API_KEY=sk-... cargo run --bin floatchat-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `FLOATCHAT_PROVIDER`: `echo` or `openai` (default: echo)
//! - `FLOATCHAT_MODEL`: Completion model name
//! - `FLOATCHAT_HISTORY_PATH`: Chat history file; empty disables persistence
//! - `OPENAI_API_KEY`: Credentials for the openai provider
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use floatchat::config::FloatChatConfig;
use floatchat::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting FloatChat HTTP Server");

    let config = FloatChatConfig::load()?;
    let addr: SocketAddr = config.bind_address().parse()?;

    let state = AppState::from_config(config);
    info!(
        "Chat provider: {}, {} conversation(s) restored",
        state.provider.name(),
        state.store.read().conversations.len()
    );
    match &state.history {
        Some(history) => info!("Chat history file: {}", history.path().display()),
        None => info!("Chat history persistence disabled"),
    }

    let app = create_router(state);

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
