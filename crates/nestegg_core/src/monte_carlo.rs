//! Repeated simulation under randomly drawn growth-rate scenarios
//!
//! Runs are strictly sequential and each one owns fresh caches, so a seed
//! always reproduces the same summary.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::Result;
use crate::model::ScenarioProfile;
use crate::simulator::{Phase, Simulator};

fn default_iterations() -> usize {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            seed: 0,
        }
    }
}

/// Distribution of final net worth across runs (cents)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    pub iterations: usize,
    pub min: i64,
    pub p5: i64,
    pub p50: i64,
    pub p95: i64,
    pub max: i64,
    pub mean: f64,
}

impl MonteCarloSummary {
    pub fn from_outcomes(mut outcomes: Vec<i64>) -> Self {
        outcomes.sort_unstable();
        let mean = if outcomes.is_empty() {
            0.0
        } else {
            outcomes.iter().map(|&v| v as f64).sum::<f64>() / outcomes.len() as f64
        };
        Self {
            iterations: outcomes.len(),
            min: percentile(&outcomes, 0.0),
            p5: percentile(&outcomes, 0.05),
            p50: percentile(&outcomes, 0.50),
            p95: percentile(&outcomes, 0.95),
            max: percentile(&outcomes, 1.0),
            mean,
        }
    }
}

/// Nearest-rank percentile of sorted values
fn percentile(sorted: &[i64], p: f64) -> i64 {
    if sorted.is_empty() {
        return 0;
    }
    let idx = (p * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

/// Simulate `config.iterations` scenarios drawn from `profile` and summarise
/// the final net worth of each.
pub fn monte_carlo(
    simulator: &mut Simulator,
    profile: &ScenarioProfile,
    config: &MonteCarloConfig,
) -> Result<MonteCarloSummary> {
    if simulator.phase() == Phase::Unconfigured {
        simulator.finalize_plan()?;
    }
    let years = simulator.horizon_years().unwrap_or(0) + 1;
    let mut rng = SmallRng::seed_from_u64(config.seed);

    let mut outcomes = Vec::with_capacity(config.iterations);
    for iteration in 0..config.iterations {
        let rates = profile.sample_rates(&mut rng, years)?;
        let states = simulator.simulate(rates)?;
        let net_worth = states.last().map_or(0, |s| s.net_worth());
        debug!(iteration, net_worth, "monte carlo run complete");
        outcomes.push(net_worth);
    }

    let summary = MonteCarloSummary::from_outcomes(outcomes);
    info!(
        iterations = summary.iterations,
        p50 = summary.p50,
        "monte carlo complete"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_percentiles() {
        let summary = MonteCarloSummary::from_outcomes((1..=101).rev().collect());
        assert_eq!(summary.iterations, 101);
        assert_eq!(summary.min, 1);
        assert_eq!(summary.p5, 6);
        assert_eq!(summary.p50, 51);
        assert_eq!(summary.p95, 96);
        assert_eq!(summary.max, 101);
        assert!((summary.mean - 51.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let summary = MonteCarloSummary::from_outcomes(Vec::new());
        assert_eq!(summary.iterations, 0);
        assert_eq!(summary.p50, 0);
    }
}
