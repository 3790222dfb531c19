//! Betting-pool tracker.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! and serves the CRUD + report API until shutdown.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use betpool::config::AppConfig;
use betpool::server;
use betpool::server::routes::ServerState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    // Load configuration from TOML (defaults when the file is absent)
    let cfg = AppConfig::load("config.toml")?;

    // Initialise structured logging
    init_logging();

    info!(
        port = cfg.server.port,
        report_title = %cfg.report.title,
        pdf_view = ?cfg.report.pdf_view,
        word_view = ?cfg.report.word_view,
        "betpool starting up"
    );

    let state = Arc::new(ServerState::new(cfg.clone()));
    server::serve(state, cfg.server.port).await?;

    info!("betpool shut down cleanly.");
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("betpool=info"));

    let json_logging = std::env::var("BETPOOL_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
