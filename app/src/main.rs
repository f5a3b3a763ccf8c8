//! FitBuddy state engine server
//!
//! Hydrates every store from SQLite, then serves the HTTP bridge until
//! Ctrl+C or SIGTERM. Queued writes are flushed before exit.

use anyhow::Result;
use fitbuddy_app::{
    config::{self, AppConfig},
    routes,
    state::{AppState, Dependencies},
    storage::SqliteKeyValueStore,
};
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if AppConfig::is_production() { "production" } else { "development" },
        "Starting FitBuddy"
    );

    if AppConfig::is_production() {
        if let Err(e) = config.validate_for_production() {
            error!("Configuration error: {}", e);
            anyhow::bail!("Invalid production configuration");
        }
    }

    info!("Opening storage...");
    let storage = SqliteKeyValueStore::connect(&config.storage.database_url).await?;
    let deps = Dependencies::from_config(&config, Arc::new(storage))?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, deps);

    let report = state.load_all().await;
    if !report.is_clean() {
        warn!(failures = report.failures.len(), "Some stores started empty");
    }

    let app = routes::create_router(state.clone());

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.flush().await;
    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "fitbuddy_app=info,fitbuddy=info,tower_http=info".into()
        } else {
            "fitbuddy_app=debug,fitbuddy=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
