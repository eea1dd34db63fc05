//! Open Badges Notify Server
//!
//! Forwards form-submission activity events to an external API, gated on a
//! one-time authorization handshake and per-user configuration.

mod api;
mod config;
mod grants;
mod server;
mod shutdown;
mod state;
mod store;

use clap::Parser;
use config::ConfigLoader;
use grants::GRANTS_DIR;
use obn_core::processors::HttpActivityNotifier;
use server::{build_router, run_server};
use shutdown::spawn_config_reload_handler;
use state::AppState;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use store::PROPERTIES_DIR;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Open Badges Notify - form-submission activity notifier
#[derive(Parser, Debug)]
#[command(name = "obn-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./obn-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Override the per-user state directory
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting obn-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = Arc::new(ConfigLoader::new(&args.config, args.listen, args.data_dir));
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;

    let listen_addr = loaded_config.server.listen;
    let request_timeout = Duration::from_secs(loaded_config.notifier.request_timeout_secs);
    tracing::info!("Configuration loaded from {:?}", args.config);

    // Create the per-user state layout. Idempotent across restarts.
    ensure_storage_layout(&loaded_config.storage.data_dir)?;

    // Convert to shared config with separate locks for each section
    let shared_config = loaded_config.into_shared();

    // Create application state
    let state = AppState::new(
        shared_config,
        HttpActivityNotifier::with_timeout(request_timeout),
    );

    // Spawn config reload handler (listens for SIGHUP)
    let shutdown_notify = spawn_config_reload_handler(state.clone(), config_loader);

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Signal the config reload handler to stop
    shutdown_notify.notify_one();

    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Create the storage subdirectories for per-user properties and grants.
fn ensure_storage_layout(data_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(data_dir.join(PROPERTIES_DIR))?;
    std::fs::create_dir_all(data_dir.join(GRANTS_DIR))?;
    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
