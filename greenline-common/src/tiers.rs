//! Incentive tier classification
//!
//! Maps a total emissions figure to a named incentive tier carrying an APR
//! benefit, and produces the reduction targets needed to reach each better
//! tier. Qualifying tiers have an ascending emissions threshold; totals
//! beyond the last threshold land in a terminal catch-all tier with no APR
//! (ineligible).
//!
//! The table is sorted by threshold once at construction and the strict
//! ordering is validated there, so classification never depends on the
//! order tiers were supplied in.

use crate::{Error, Result};
use serde::Serialize;

/// One qualifying tier: emissions at or below `max_emissions` earn `apr`
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub name: String,
    /// Upper emissions bound for this tier, kg CO₂e
    pub max_emissions: f64,
    /// Annual percentage rate benefit, percent
    pub apr: f64,
}

impl Tier {
    pub fn new(name: impl Into<String>, max_emissions: f64, apr: f64) -> Self {
        Self {
            name: name.into(),
            max_emissions,
            apr,
        }
    }
}

/// Classification outcome for one emissions total
///
/// `apr` is `None` when the total fell through to the catch-all tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierResult {
    pub tier: String,
    pub apr: Option<f64>,
    pub recommendations: Vec<String>,
}

/// Ordered tier table plus the terminal catch-all tier name
///
/// Process-wide constant configuration; build once at startup and share.
#[derive(Debug, Clone)]
pub struct TierTable {
    /// Qualifying tiers, ascending by threshold
    tiers: Vec<Tier>,
    /// Name of the ineligible catch-all tier
    catch_all: String,
}

impl TierTable {
    /// Build a table from tiers in any order
    ///
    /// Sorts by threshold and rejects duplicate or non-finite thresholds.
    pub fn new(mut tiers: Vec<Tier>, catch_all: impl Into<String>) -> Result<Self> {
        if tiers.is_empty() {
            return Err(Error::Config(
                "tier table needs at least one qualifying tier".to_string(),
            ));
        }
        for tier in &tiers {
            if !tier.max_emissions.is_finite() {
                return Err(Error::Config(format!(
                    "tier {} has a non-finite threshold",
                    tier.name
                )));
            }
        }

        tiers.sort_by(|a, b| a.max_emissions.total_cmp(&b.max_emissions));

        for pair in tiers.windows(2) {
            if pair[0].max_emissions >= pair[1].max_emissions {
                return Err(Error::Config(format!(
                    "tiers {} and {} share threshold {}",
                    pair[0].name, pair[1].name, pair[0].max_emissions
                )));
            }
        }

        Ok(Self {
            tiers,
            catch_all: catch_all.into(),
        })
    }

    /// The production tier table
    ///
    /// A+ ≤ 20 @ 3.5%, A ≤ 50 @ 4.5%, B ≤ 100 @ 6.0%, C ≤ 175 @ 8.5%,
    /// D catch-all (ineligible). Already ascending; validated by tests.
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                Tier::new("A+", 20.0, 3.5),
                Tier::new("A", 50.0, 4.5),
                Tier::new("B", 100.0, 6.0),
                Tier::new("C", 175.0, 8.5),
            ],
            catch_all: "D".to_string(),
        }
    }

    /// Classify a total: first tier whose threshold covers it wins
    ///
    /// Tiers are walked in ascending-threshold order so the first match is
    /// the tightest qualifying tier; totals beyond every threshold fall
    /// through to the catch-all.
    pub fn classify(&self, total_emissions: f64) -> (&str, Option<f64>) {
        for tier in &self.tiers {
            if total_emissions <= tier.max_emissions {
                return (&tier.name, Some(tier.apr));
            }
        }
        (&self.catch_all, None)
    }

    /// APR for a total, `None` when ineligible
    pub fn apr(&self, total_emissions: f64) -> Option<f64> {
        self.classify(total_emissions).1
    }

    /// Reduction targets for every tier stricter than the current total
    ///
    /// Always returns at least one entry: when nothing needs reducing the
    /// single sentinel message is returned instead of an empty list, which
    /// callers rely on.
    pub fn recommendations(&self, total_emissions: f64) -> Vec<String> {
        let recommendations: Vec<String> = self
            .tiers
            .iter()
            .filter(|tier| total_emissions > tier.max_emissions)
            .map(|tier| {
                let reduction_needed = total_emissions - tier.max_emissions;
                format!(
                    "Reduce emissions by {} kg CO₂ to reach Tier {} (APR: {}%)",
                    reduction_needed, tier.name, tier.apr
                )
            })
            .collect();

        if recommendations.is_empty() {
            vec!["You're at the highest tier!".to_string()]
        } else {
            recommendations
        }
    }

    /// Full classification: tier, APR, and reduction targets
    pub fn classify_and_recommend(&self, total_emissions: f64) -> TierResult {
        let (tier, apr) = self.classify(total_emissions);
        TierResult {
            tier: tier.to_string(),
            apr,
            recommendations: self.recommendations(total_emissions),
        }
    }
}
