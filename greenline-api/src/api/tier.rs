//! Incentive tier endpoint

use axum::{extract::State, Json};
use serde::Deserialize;

use greenline_common::TierResult;

use crate::AppState;

/// Request body for POST /tier
#[derive(Debug, Deserialize)]
pub struct TierRequest {
    /// Combined Scope 1 + Scope 2 total, kg CO₂e
    pub total_emissions: f64,
}

/// POST /tier
///
/// Classifies a total emissions figure into an incentive tier and returns
/// the APR (null when ineligible) plus the reduction targets for every
/// stricter tier.
pub async fn classify_tier(
    State(state): State<AppState>,
    Json(request): Json<TierRequest>,
) -> Json<TierResult> {
    Json(state.tiers.classify_and_recommend(request.total_emissions))
}
