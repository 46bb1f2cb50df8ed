//! Simulator configuration and the plan DSL
//!
//! `SimulatorConfig` carries the run-wide knobs; [`Plan`] is the
//! time-indexed description of a single component.
//!
//! ```ignore
//! use nestegg_core::config::{Plan, SimulatorConfig};
//!
//! let mut sim = Simulator::new(SimulatorConfig::starting(date(2025, 1, 1)));
//! sim.add_primary(Person::new(date(1964, 3, 2)))?;
//! let k401 = sim.add_account(
//!     Holder::Primary,
//!     Plan::beginning(date(2025, 1, 1), AccountFields::new(AccountKind::Traditional401k)
//!         .holding(GrowthCategory::Stocks, 300_000_00)),
//! )?;
//! sim.add_job(
//!     Holder::Primary,
//!     Plan::beginning(date(2025, 1, 1), JobFields::new(100_000_00, date(2025, 1, 1))
//!         .savings_plan(7.0, 3.0, k401, GrowthCategory::Stocks))
//!         .stop(date(2031, 3, 1)),
//! )?;
//! let states = sim.simulate(growth_rates)?;
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

pub mod plan;

pub use plan::{Plan, PlanReader};

fn default_end_age() -> i16 {
    100
}

fn default_withholding_rate() -> f64 {
    0.30
}

fn default_annual_raise() -> f64 {
    1.02
}

/// Run-wide simulator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// First simulated date
    pub beginning: Date,

    /// The horizon ends on Jan 1 after the youngest person turns this age
    #[serde(default = "default_end_age")]
    pub end_age: i16,

    /// Flat share of adjusted wages withheld for tax
    #[serde(default = "default_withholding_rate")]
    pub withholding_rate: f64,

    /// Yearly raise factor used to project a salary history when estimating
    /// a social-security benefit
    #[serde(default = "default_annual_raise")]
    pub estimated_annual_raise: f64,

    /// Year the "current salary" refers to when estimating benefits.
    /// Defaults to the beginning year.
    #[serde(default)]
    pub estimation_year: Option<i16>,
}

impl SimulatorConfig {
    pub fn starting(beginning: Date) -> Self {
        Self {
            beginning,
            end_age: default_end_age(),
            withholding_rate: default_withholding_rate(),
            estimated_annual_raise: default_annual_raise(),
            estimation_year: None,
        }
    }

    #[must_use]
    pub fn with_end_age(mut self, end_age: i16) -> Self {
        self.end_age = end_age;
        self
    }

    #[must_use]
    pub fn with_withholding_rate(mut self, rate: f64) -> Self {
        self.withholding_rate = rate;
        self
    }

    pub fn estimation_year(&self) -> i16 {
        self.estimation_year.unwrap_or(self.beginning.year())
    }
}
