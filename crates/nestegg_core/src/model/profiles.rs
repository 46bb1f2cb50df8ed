//! Random growth-rate scenarios for Monte Carlo runs
//!
//! A [`GrowthProfile`] describes how one category's annual multiplier is
//! drawn; a [`ScenarioProfile`] bundles one profile per category and samples
//! complete [`GrowthRates`] inputs for `Simulator::simulate`.

use std::collections::BTreeMap;

use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

use super::growth::{GrowthCategory, GrowthRates};
use crate::error::ScenarioError;

/// How one category's yearly multiplier is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type")]
pub enum GrowthProfile {
    /// Always 1.0
    #[default]
    Neutral,
    Fixed { multiplier: f64 },
    /// Uniform over `low, low + step, ..., high`
    Grid { low: f64, high: f64, step: f64 },
    Normal { mean: f64, std_dev: f64 },
    /// Multiplier = exp(N(mu, sigma))
    LogNormal { mu: f64, sigma: f64 },
}

impl GrowthProfile {
    /// Draws from 0.90 to 1.30 in 0.01 steps
    pub const WIDE_GRID: GrowthProfile = GrowthProfile::Grid {
        low: 0.90,
        high: 1.30,
        step: 0.01,
    };

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64, ScenarioError> {
        match self {
            GrowthProfile::Neutral => Ok(1.0),
            GrowthProfile::Fixed { multiplier } => Ok(*multiplier),
            GrowthProfile::Grid { low, high, step } => {
                if !step.is_finite() || *step <= 0.0 || high < low {
                    return Err(ScenarioError::InvalidDistributionParameters {
                        profile_type: "Grid growth",
                        location: *low,
                        spread: *step,
                        reason: "step must be positive and high must not be below low",
                    });
                }
                let points = ((high - low) / step).round() as u32 + 1;
                let index = rng.random_range(0..points);
                // Round to the grid's precision so draws stay on exact steps
                let value = low + f64::from(index) * step;
                Ok((value * 1e6).round() / 1e6)
            }
            GrowthProfile::Normal { mean, std_dev } => rand_distr::Normal::new(*mean, *std_dev)
                .map(|d| d.sample(rng))
                .map_err(|_| ScenarioError::InvalidDistributionParameters {
                    profile_type: "Normal growth",
                    location: *mean,
                    spread: *std_dev,
                    reason: "std_dev must be non-negative and finite",
                }),
            GrowthProfile::LogNormal { mu, sigma } => rand_distr::LogNormal::new(*mu, *sigma)
                .map(|d| d.sample(rng))
                .map_err(|_| ScenarioError::InvalidDistributionParameters {
                    profile_type: "LogNormal growth",
                    location: *mu,
                    spread: *sigma,
                    reason: "sigma must be non-negative and finite",
                }),
        }
    }

    pub fn sample_sequence<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        years: usize,
    ) -> Result<Vec<f64>, ScenarioError> {
        let mut values = Vec::with_capacity(years);
        for _ in 0..years {
            values.push(self.sample(rng)?);
        }
        Ok(values)
    }
}

/// One growth profile per category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioProfile {
    #[serde(default)]
    pub profiles: BTreeMap<GrowthCategory, GrowthProfile>,
}

impl ScenarioProfile {
    #[must_use]
    pub fn with(mut self, category: GrowthCategory, profile: GrowthProfile) -> Self {
        self.profiles.insert(category, profile);
        self
    }

    /// Every category drawn from the wide 0.90..=1.30 grid
    pub fn wide_grid() -> Self {
        GrowthCategory::ALL
            .iter()
            .fold(Self::default(), |p, &c| p.with(c, GrowthProfile::WIDE_GRID))
    }

    /// Sample a full scenario of `years` multipliers per category.
    ///
    /// Categories are drawn in their declared order so a seed always maps to
    /// the same scenario.
    pub fn sample_rates<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        years: usize,
    ) -> Result<GrowthRates, ScenarioError> {
        let mut rates = GrowthRates::new();
        for (&category, profile) in &self.profiles {
            rates.insert(category, profile.sample_sequence(rng, years)?);
        }
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_grid_draws_stay_on_grid() {
        let mut rng = SmallRng::seed_from_u64(7);
        let values = GrowthProfile::WIDE_GRID
            .sample_sequence(&mut rng, 500)
            .unwrap();
        for v in values {
            assert!((0.90..=1.30).contains(&v), "{v} outside grid");
            let steps = (v - 0.90) / 0.01;
            assert!((steps - steps.round()).abs() < 1e-6, "{v} off grid");
        }
    }

    #[test]
    fn test_invalid_parameters_are_reported() {
        let mut rng = SmallRng::seed_from_u64(1);
        let normal = GrowthProfile::Normal {
            mean: 1.05,
            std_dev: -1.0,
        };
        assert!(normal.sample(&mut rng).is_err());
        let grid = GrowthProfile::Grid {
            low: 1.0,
            high: 1.1,
            step: 0.0,
        };
        assert!(grid.sample(&mut rng).is_err());
    }

    #[test]
    fn test_sample_rates_is_deterministic_per_seed() {
        let profile = ScenarioProfile::wide_grid();
        let a = profile
            .sample_rates(&mut SmallRng::seed_from_u64(42), 30)
            .unwrap();
        let b = profile
            .sample_rates(&mut SmallRng::seed_from_u64(42), 30)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 4);
        assert!(a.values().all(|s| s.len() == 30));
    }

    #[test]
    fn test_fixed_and_neutral() {
        let mut rng = SmallRng::seed_from_u64(3);
        let fixed = GrowthProfile::Fixed { multiplier: 1.06 };
        assert_eq!(fixed.sample(&mut rng).unwrap(), 1.06);
        assert_eq!(GrowthProfile::Neutral.sample(&mut rng).unwrap(), 1.0);
    }
}
