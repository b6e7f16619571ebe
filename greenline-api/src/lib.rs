//! greenline-api library - HTTP service for emission calculation and
//! incentive tier lookup
//!
//! Exposes the router and application state for integration testing.

use axum::Router;
use greenline_common::{EmissionFactors, GridFactors, TierTable};
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod api;
pub mod error;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
///
/// The factor and tier tables are immutable after startup, so handlers can
/// read them concurrently without locking.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Scope 1 per-unit emission factors
    pub factors: EmissionFactors,
    /// Per-region grid factors for Scope 2
    pub grid: Arc<GridFactors>,
    /// Incentive tier table, ascending by threshold
    pub tiers: Arc<TierTable>,
}

impl AppState {
    /// Create application state with the production factor tables
    pub fn new(db: SqlitePool) -> Self {
        Self {
            db,
            factors: EmissionFactors::default(),
            grid: Arc::new(GridFactors::default()),
            tiers: Arc::new(TierTable::standard()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/upload", post(api::upload_file))
        .route("/calculate", post(api::calculate_emissions))
        .route("/tier", post(api::classify_tier))
        .route("/emissions/recent", get(api::recent_emissions))
        .merge(api::health_routes())
        .with_state(state)
        // Enable CORS for local front-end access
        .layer(CorsLayer::permissive())
}
