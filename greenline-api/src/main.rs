//! greenline-api - Emission calculation and incentive tier service
//!
//! Accepts uploaded activity spreadsheets, computes Scope 1 / Scope 2
//! greenhouse-gas emission estimates, maps totals to incentive tiers with
//! APR benefits, and records results in a local SQLite database.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use greenline_api::{build_router, AppState};
use greenline_common::config;

/// Command-line arguments for greenline-api
#[derive(Parser, Debug)]
#[command(name = "greenline-api")]
#[command(about = "Emission calculation and incentive tier service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5730", env = "GREENLINE_PORT")]
    port: u16,

    /// Root folder holding the service database
    #[arg(short, long, env = config::ROOT_ENV_VAR)]
    root_folder: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenline_api=debug,greenline_common=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!(
        "Starting greenline-api v{} on port {}",
        env!("CARGO_PKG_VERSION"),
        args.port
    );

    // Resolve root folder and make sure it exists
    let root_folder = config::resolve_root_folder(args.root_folder.as_deref());
    config::ensure_root_folder(&root_folder)
        .context("Failed to initialize root folder")?;
    info!("Root folder: {}", root_folder.display());

    // Open or create the database
    let db_path = config::database_path(&root_folder);
    let pool = greenline_common::db::init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    // Factor and tier tables are built once here and shared read-only
    let state = AppState::new(pool);
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
