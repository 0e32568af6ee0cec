//! castmap-api - Cast credit aggregation microservice
//!
//! Serves three views derived from per-movie cast credits fetched once from
//! the upstream credit API:
//! - GET /api/performers/titles
//! - GET /api/performers/multiple-roles
//! - GET /api/roles/multiple-performers

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use castmap_api::services::{CastViewService, TmdbCreditClient};
use castmap_api::{build_router, config, AppState};
use castmap_common::config::{load_toml_config, ConfigPathResolver};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for castmap-api
#[derive(Parser, Debug)]
#[command(name = "castmap-api")]
#[command(about = "Cast credit aggregation microservice")]
#[command(version)]
struct Args {
    /// Path to castmap.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides bind_address port)
    #[arg(short, long, env = "CASTMAP_PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "castmap_api=info,castmap_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting castmap-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let config_path = ConfigPathResolver::new(args.config).resolve();
    info!("Config file: {}", config_path.display());
    let toml_config = load_toml_config(&config_path).context("Failed to load configuration")?;

    let api_key = config::resolve_api_key(&toml_config)?;
    let client = TmdbCreditClient::new(
        &toml_config.upstream.base_url,
        &api_key,
        Duration::from_secs(toml_config.upstream.request_timeout_secs),
    )
    .context("Failed to create upstream credit client")?;

    let views = Arc::new(CastViewService::new(
        Arc::new(client),
        toml_config.movies.clone(),
        toml_config.performers.iter().cloned(),
        toml_config.matching,
    ));
    info!(
        movies = toml_config.movies.len(),
        performers = views.tracked_performers(),
        token_set_threshold = toml_config.matching.token_set_threshold,
        edit_ratio_threshold = toml_config.matching.edit_ratio_threshold,
        "Cast view service initialized"
    );

    let app = build_router(AppState::new(views));

    let addr = config::resolve_bind_address(&toml_config, args.port)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("castmap-api listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
