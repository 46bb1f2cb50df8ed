//! Household retirement simulation library
//!
//! This crate projects a household's finances year by year under a chosen
//! set of annual growth rates. It supports:
//! - Jobs with payroll savings plans and employer matches
//! - Pre-tax and post-tax accounts holding stocks and bonds
//! - Social-security benefits, supplied or estimated from salary history
//! - Spending strategies that draw down pre-tax savings
//! - Monte Carlo runs over randomly drawn growth-rate scenarios
//!
//! Plan components describe what changes on which date; at finalize each one
//! becomes a [`Generator`] that emits dated [`Transform`]s. The simulator
//! steps one calendar year at a time, applying every transform in the window
//! to a fresh [`State`] before accruing growth.
//!
//! # Example
//!
//! ```ignore
//! use jiff::civil::date;
//! use nestegg_core::components::{AccountFields, JobFields, SocialSecurityFields};
//! use nestegg_core::config::{Plan, SimulatorConfig};
//! use nestegg_core::model::{AccountKind, GrowthCategory, GrowthRates, Holder, Person};
//! use nestegg_core::Simulator;
//!
//! let start = date(2025, 1, 1);
//! let mut sim = Simulator::new(SimulatorConfig::starting(start));
//! sim.add_primary(Person::new(date(1964, 3, 2)))?;
//! let k401 = sim.add_account(
//!     Holder::Primary,
//!     Plan::beginning(start, AccountFields::new(AccountKind::Traditional401k)
//!         .holding(GrowthCategory::Stocks, 300_000_00)),
//! )?;
//! sim.add_job(
//!     Holder::Primary,
//!     Plan::beginning(start, JobFields::new(100_000_00, start)
//!         .savings_plan(7.0, 3.0, k401, GrowthCategory::Stocks))
//!         .stop(date(2031, 3, 1)),
//! )?;
//! sim.add_social_security(
//!     Holder::Primary,
//!     Plan::beginning(start, SocialSecurityFields::estimated()).start(date(2031, 3, 1)),
//! )?;
//! let states = sim.simulate(GrowthRates::from([(GrowthCategory::Stocks, vec![1.06])]))?;
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod components;
pub mod date_math;
pub mod error;
pub mod generator;
pub mod monte_carlo;
pub mod simulator;
pub mod social_security;
pub mod state;
pub mod transform;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod config;
pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use config::{Plan, PlanReader, SimulatorConfig};
pub use error::{BenefitError, ScenarioError, SetupError, SimulationError};
pub use generator::Generator;
pub use monte_carlo::{MonteCarloConfig, MonteCarloSummary, monte_carlo};
pub use simulator::{Phase, SimulationRun, Simulator};
pub use social_security::BenefitCalculator;
pub use state::{State, StateReport};
pub use transform::Transform;
