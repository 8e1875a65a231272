//! countyhealth: county public-health measure lookup API.
//!
//! This is the server entry point. It loads configuration from a TOML
//! file, initializes tracing, builds the Axum router, and serves until
//! the process is stopped. The database it queries is produced offline
//! by the `loader` binary.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use countyhealth::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use countyhealth::measures::ALLOWED_MEASURES;
use countyhealth::routes::create_router;
use countyhealth::state::AppState;

/// countyhealth: an HTTP API for county health rankings
#[derive(Parser, Debug)]
#[command(name = "countyhealth", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "countyhealth=debug")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration first; it selects the log format.
    let config = AppConfig::load(&args.config)?;

    // Filter priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        database = %config.database.path.display(),
        table = %config.database.table,
        measures = ALLOWED_MEASURES.len(),
        "Loaded configuration"
    );

    if !config.database.path.exists() {
        tracing::warn!(
            database = %config.database.path.display(),
            "Database file does not exist yet; run the loader before serving traffic"
        );
    }

    let state = AppState::new(config.clone());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;
    tracing::info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
