//! Emission calculation endpoint
//!
//! Accepts activity quantities, runs the Scope 1 / Scope 2 calculation,
//! records the result, and returns the totals. Absent quantities default
//! to zero and an absent region defaults to the standard one, so a bare
//! `{}` body is a valid (all-zero) submission.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use greenline_common::db::{insert_emission_record, recent_emission_records, EmissionRecord};
use greenline_common::emissions::{self, ActivityInput};

use crate::{ApiResult, AppState};

/// Request body for POST /calculate
#[derive(Debug, Deserialize)]
pub struct CalculateRequest {
    #[serde(flatten)]
    pub activity: ActivityInput,

    /// Submitting user, recorded alongside the result when present
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// Response body: computed totals, kg CO₂e
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    pub scope1: f64,
    pub scope2: f64,
}

/// POST /calculate
///
/// Computes both emission scopes for one activity submission and records
/// the result in the emissions table.
pub async fn calculate_emissions(
    State(state): State<AppState>,
    Json(request): Json<CalculateRequest>,
) -> ApiResult<Json<CalculateResponse>> {
    let result = emissions::calculate(&request.activity, &state.factors, &state.grid);

    debug!(
        scope1 = result.scope1,
        scope2 = result.scope2,
        region = %request.activity.region,
        "Calculated emissions"
    );

    let record = EmissionRecord::new(request.user_id, &result);
    insert_emission_record(&state.db, &record).await?;

    Ok(Json(CalculateResponse {
        scope1: result.scope1,
        scope2: result.scope2,
    }))
}

/// Query parameters for GET /emissions/recent
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    /// Maximum records to return (default 20, capped at 100)
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Response body for GET /emissions/recent
#[derive(Debug, Serialize)]
pub struct RecentEmissionsResponse {
    pub count: usize,
    pub records: Vec<EmissionRecord>,
}

/// GET /emissions/recent
///
/// Returns the most recently recorded calculation results, newest first.
pub async fn recent_emissions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Json<RecentEmissionsResponse>> {
    let limit = query.limit.clamp(1, 100);
    let records = recent_emission_records(&state.db, limit).await?;

    Ok(Json(RecentEmissionsResponse {
        count: records.len(),
        records,
    }))
}
