//! RIC-XI Inventory Server
//!
//! REST API server for the campus inventory.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ricxi_inventory::{
    api,
    config::{AppConfig, LoggingConfig},
    repository::Repository,
    services::clock::{Clock, SystemClock},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_tracing(&config.logging);

    tracing::info!("Starting RIC-XI Inventory Server v{}", env!("CARGO_PKG_VERSION"));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = if config.inventory.seed_data {
        tracing::info!("Loading mock catalog");
        Repository::seeded(clock.today())
    } else {
        Repository::new()
    };

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState::new(config, repository, clock);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API documentation on http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ricxi_inventory={},tower_http=debug", config.level).into());

    let json = config.format.eq_ignore_ascii_case("json");
    let stdout_json = json.then(|| fmt::layer().json());
    let stdout_pretty = (!json).then(fmt::layer);

    let (file_layer, guard) = match config.file.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "ricxi-inventory.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_json)
        .with(stdout_pretty)
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
