//! crosspost-server - HTTP server for multi-platform publishing
//!
//! Serves the publisher API and runs the background loop that promotes due
//! scheduled posts.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use libcrosspost::logging::{LogFormat, LoggingConfig};
use libcrosspost::service::PublisherService;
use libcrosspost::{Config, CrosspostError, Result};

use crosspost_server::{api, scheduler};

#[derive(Parser, Debug)]
#[command(name = "crosspost-server")]
#[command(version)]
#[command(about = "HTTP server for multi-platform publishing")]
#[command(long_about = "\
crosspost-server - HTTP server for multi-platform publishing

DESCRIPTION:
    crosspost-server exposes the publisher API: platform listing, single and
    batch publishing, previews, history, scheduled posts, and analytics.

    A background loop polls the scheduled queue and publishes entries whose
    schedule time has passed.

USAGE:
    # Run with defaults (binds 127.0.0.1:8080)
    crosspost-server

    # Bind elsewhere and scan the queue every 10 seconds
    crosspost-server --bind 0.0.0.0:3000 --poll-interval 10

CONFIGURATION:
    Configuration file: ~/.config/crosspost/config.toml

    [server]
    bind = \"127.0.0.1:8080\"

    [scheduler]
    enabled = true
    poll_interval = 60

    Override with environment variables:
        CROSSPOST_CONFIG      - Path to config file
        CROSSPOST_LOG_FORMAT  - Log format (text, json, pretty)
        CROSSPOST_LOG_LEVEL   - Log level (error, warn, info, debug, trace)

EXIT CODES:
    0 - Clean shutdown
    1 - Runtime error
    2 - Configuration error
")]
struct Cli {
    /// Address to bind (overrides config)
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// Path to config file (overrides CROSSPOST_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds between scheduled-queue scans (overrides config)
    #[arg(long, value_name = "SECONDS")]
    poll_interval: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

/// Initialize logging from env vars, with --verbose forcing debug level
fn init_logging(verbose: bool) {
    let format = std::env::var("CROSSPOST_LOG_FORMAT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(LogFormat::Text);
    let level = std::env::var("CROSSPOST_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    LoggingConfig::new(format, level, verbose).init();
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default()?,
    };

    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let service = Arc::new(PublisherService::new());

    let scheduler_handle = if config.scheduler.enabled {
        let poll_interval = cli.poll_interval.unwrap_or(config.scheduler.poll_interval);
        Some(tokio::spawn(scheduler::run(
            Arc::clone(&service),
            poll_interval,
        )))
    } else {
        info!("scheduler disabled; scheduled posts will not be promoted");
        None
    };

    let app = api::create_router(Arc::clone(&service));
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .map_err(|e| CrosspostError::Server(format!("Failed to bind {}: {}", bind, e)))?;

    info!("crosspost-server listening on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CrosspostError::Server(e.to_string()))?;

    if let Some(handle) = scheduler_handle {
        handle.abort();
    }

    info!("crosspost-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal, stopping gracefully...");
    }
}
