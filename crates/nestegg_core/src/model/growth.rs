//! Growth-rate scenarios
//!
//! A scenario is one complete set of annual multipliers per monetary category.
//! The engine is run many times under different scenarios, so every cache that
//! depends on growth rates is keyed by a [`ScenarioKey`] built from the
//! scenario's own contents rather than from anything incidental.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Monetary categories that compound under a growth multiplier.
///
/// `Stocks` and `Bonds` double as account holdings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthCategory {
    Stocks,
    Bonds,
    WageGrowth,
    Inflation,
}

impl GrowthCategory {
    pub const ALL: [GrowthCategory; 4] = [
        GrowthCategory::Stocks,
        GrowthCategory::Bonds,
        GrowthCategory::WageGrowth,
        GrowthCategory::Inflation,
    ];
}

/// Caller-facing scenario input: category -> multipliers, index 0 = start year
pub type GrowthRates = BTreeMap<GrowthCategory, Vec<f64>>;

/// Multiplier used for any year a series does not cover
pub const NEUTRAL_MULTIPLIER: f64 = 1.0;

/// Immutable identity of one category's series within one scenario.
///
/// Two keys compare equal only when the start year and every multiplier are
/// bit-identical, so cached values can never leak between scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScenarioKey {
    category: GrowthCategory,
    start_year: i16,
    multipliers: Arc<[u64]>,
}

impl ScenarioKey {
    pub fn category(&self) -> GrowthCategory {
        self.category
    }
}

/// One scenario's annual multipliers, anchored at a start year
#[derive(Debug, Clone)]
pub struct GrowthRateSet {
    start_year: i16,
    series: BTreeMap<GrowthCategory, Vec<f64>>,
    keys: BTreeMap<GrowthCategory, ScenarioKey>,
}

impl GrowthRateSet {
    pub fn new(rates: GrowthRates, start_year: i16) -> Self {
        let keys = GrowthCategory::ALL
            .iter()
            .map(|&category| {
                let multipliers: Arc<[u64]> = rates
                    .get(&category)
                    .map(|s| s.iter().map(|m| m.to_bits()).collect())
                    .unwrap_or_else(|| Arc::from(Vec::new()));
                (
                    category,
                    ScenarioKey {
                        category,
                        start_year,
                        multipliers,
                    },
                )
            })
            .collect();

        Self {
            start_year,
            series: rates,
            keys,
        }
    }

    /// Scenario with no growth in any category
    pub fn neutral(start_year: i16) -> Self {
        Self::new(GrowthRates::new(), start_year)
    }

    pub fn start_year(&self) -> i16 {
        self.start_year
    }

    /// Multiplier for `category` during `year`.
    ///
    /// Years before the start year or past the end of the series fall back to
    /// [`NEUTRAL_MULTIPLIER`] so scenario generators need not cover the whole
    /// horizon.
    pub fn annually(&self, category: GrowthCategory, year: i16) -> f64 {
        let offset = year as i32 - self.start_year as i32;
        if offset < 0 {
            return NEUTRAL_MULTIPLIER;
        }
        self.series
            .get(&category)
            .and_then(|s| s.get(offset as usize))
            .copied()
            .unwrap_or(NEUTRAL_MULTIPLIER)
    }

    pub fn hash_key(&self, category: GrowthCategory) -> &ScenarioKey {
        &self.keys[&category]
    }
}
