//! Greenhouse-gas emission calculation
//!
//! Computes Scope 1 (direct on-site combustion) and Scope 2 (purchased
//! electricity) emission totals in kilograms of CO₂-equivalent from
//! user-submitted activity quantities.
//!
//! All calculation paths are pure functions over read-only factor tables
//! constructed once at startup. Missing quantities default to zero and
//! unknown regions fall back to a default grid factor, so no operation
//! here can fail on well-typed input. Input coercion errors belong to the
//! HTTP boundary, not this module.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Short-ton to metric-ton conversion divisor applied to grid emissions
pub const SHORT_TON_TO_METRIC: f64 = 0.907185;

/// Region used when a request does not name one
pub const DEFAULT_REGION: &str = "Washington";

/// Activity quantities submitted for one calculation
///
/// Constructed fresh per request and discarded after use. Field names on
/// the wire match the upload front end (`diesel_used`, `kwh_used`, ...).
/// Absent fields deserialize to zero; an absent region deserializes to
/// [`DEFAULT_REGION`].
///
/// Negative quantities are accepted without rejection and produce negative
/// totals; callers wanting stricter validation must apply it before
/// calling in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActivityInput {
    /// Diesel consumed, gallons
    #[serde(rename = "diesel_used", default)]
    pub diesel_gallons: f64,

    /// Gasoline consumed, gallons
    #[serde(rename = "gasoline_used", default)]
    pub gasoline_gallons: f64,

    /// Natural gas consumed, cubic meters
    #[serde(rename = "natural_gas_used", default)]
    pub natural_gas_m3: f64,

    /// Electricity purchased, kWh
    #[serde(rename = "kwh_used", default)]
    pub electricity_kwh: f64,

    /// Grid region for the Scope 2 factor lookup
    #[serde(rename = "State", default = "default_region")]
    pub region: String,
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

impl Default for ActivityInput {
    fn default() -> Self {
        Self {
            diesel_gallons: 0.0,
            gasoline_gallons: 0.0,
            natural_gas_m3: 0.0,
            electricity_kwh: 0.0,
            region: default_region(),
        }
    }
}

/// Computed emission totals, kg CO₂e. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionResult {
    /// Direct combustion total
    pub scope1: f64,
    /// Purchased electricity total
    pub scope2: f64,
}

impl EmissionResult {
    /// Combined Scope 1 + Scope 2 total, the input to tier classification
    pub fn total(&self) -> f64 {
        self.scope1 + self.scope2
    }
}

/// Per-unit Scope 1 emission factors
///
/// EPA stationary/mobile combustion factors, kg CO₂ per unit of fuel.
#[derive(Debug, Clone, Copy)]
pub struct EmissionFactors {
    /// kg CO₂ per gallon of diesel
    pub diesel_kg_per_gallon: f64,
    /// kg CO₂ per gallon of gasoline
    pub gasoline_kg_per_gallon: f64,
    /// kg CO₂ per cubic meter of natural gas
    pub natural_gas_kg_per_m3: f64,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            diesel_kg_per_gallon: 10.19,
            gasoline_kg_per_gallon: 8.887,
            natural_gas_kg_per_m3: 1.9,
        }
    }
}

impl EmissionFactors {
    /// Scope 1 total: weighted sum of fuel quantities
    pub fn scope1(&self, diesel_gallons: f64, gasoline_gallons: f64, natural_gas_m3: f64) -> f64 {
        diesel_gallons * self.diesel_kg_per_gallon
            + gasoline_gallons * self.gasoline_kg_per_gallon
            + natural_gas_m3 * self.natural_gas_kg_per_m3
    }
}

/// Per-region grid emission factors for Scope 2
///
/// Regions not present in the table use the default factor rather than
/// failing the calculation.
#[derive(Debug, Clone)]
pub struct GridFactors {
    factors: HashMap<String, f64>,
    default_kg_per_kwh: f64,
}

impl Default for GridFactors {
    fn default() -> Self {
        let mut factors = HashMap::new();
        // eGRID subregion average, kg CO₂/kWh
        factors.insert("Washington".to_string(), 0.385);

        Self {
            factors,
            default_kg_per_kwh: 0.3,
        }
    }
}

impl GridFactors {
    /// Grid factor for a region, or the default for unknown regions
    pub fn factor_for(&self, region: &str) -> f64 {
        self.factors
            .get(region)
            .copied()
            .unwrap_or(self.default_kg_per_kwh)
    }

    /// Scope 2 total for purchased electricity in the given region
    pub fn scope2(&self, kwh: f64, region: &str) -> f64 {
        (kwh * self.factor_for(region)) / SHORT_TON_TO_METRIC
    }
}

/// Compute both emission scopes for one activity submission
pub fn calculate(
    input: &ActivityInput,
    factors: &EmissionFactors,
    grid: &GridFactors,
) -> EmissionResult {
    EmissionResult {
        scope1: factors.scope1(
            input.diesel_gallons,
            input.gasoline_gallons,
            input.natural_gas_m3,
        ),
        scope2: grid.scope2(input.electricity_kwh, &input.region),
    }
}
