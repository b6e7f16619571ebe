//! HTTP API handlers for greenline-api

pub mod calculate;
pub mod health;
pub mod tier;
pub mod upload;

pub use calculate::{calculate_emissions, recent_emissions};
pub use health::health_routes;
pub use tier::classify_tier;
pub use upload::upload_file;
