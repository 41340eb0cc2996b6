//! Cluster Explorer (tonescope-cx) - Dashboard over the clustered song table
//!
//! Serves descriptive views (overview, cluster explorer, feature analysis,
//! song recommender) over a song table annotated offline by the clustering
//! pipeline. The table is read once at startup and shared read-only.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};

use tonescope_common::config::resolve_dataset_path;
use tonescope_common::Dataset;
use tonescope_cx::{build_router, AppState};

/// Command-line arguments for tonescope-cx
#[derive(Parser, Debug)]
#[command(name = "tonescope-cx")]
#[command(about = "Cluster Explorer dashboard for Tonescope")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "TONESCOPE_CX_PORT")]
    port: u16,

    /// Path to the clustered song table (CSV)
    #[arg(short, long, env = "TONESCOPE_DATASET")]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Tonescope Cluster Explorer (tonescope-cx) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let args = Args::parse();

    let dataset_path = resolve_dataset_path(args.dataset);
    info!("Dataset path: {}", dataset_path.display());

    // One read for the process lifetime; a load failure halts startup with
    // a single user-visible message and nothing renders
    let dataset = match Dataset::load(&dataset_path) {
        Ok(dataset) => {
            info!(
                "✓ Loaded {} songs across {} clusters",
                dataset.len(),
                dataset.cluster_ids().len()
            );
            dataset
        }
        Err(e) => {
            error!("Failed to load dataset: {}", e);
            return Err(e.into());
        }
    };

    // Create application state and router
    let state = AppState::new(dataset);
    let app = build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("tonescope-cx listening on http://{}", addr);
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
