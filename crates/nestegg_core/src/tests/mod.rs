//! Scenario tests for the nestegg simulation engine
//!
//! Tests are organized by topic:
//! - `basic` - Year stepping, wage transforms and growth
//! - `simulator` - Plan setup, finalize and the phase machine
//! - `social_security` - Benefit calculator scenarios
//! - `spending` - Spending strategies and pre-tax withdrawals
//! - `monte_carlo` - Randomized scenario runs

mod basic;
mod social_security;

use jiff::civil::{Date, date};

use crate::components::{AccountFields, JobFields};
use crate::config::{Plan, SimulatorConfig};
use crate::model::{AccountKind, ComponentKey, GrowthCategory, GrowthRates, Holder, Person};
use crate::simulator::Simulator;

pub(crate) const BEGINNING: Date = date(2025, 1, 1);

/// Every category pinned to `multiplier` for the whole horizon
pub(crate) fn flat_rates(multiplier: f64) -> GrowthRates {
    GrowthCategory::ALL
        .iter()
        .map(|&c| (c, vec![multiplier; 120]))
        .collect()
}

/// Primary born 1964-03-02 with an empty 401k; returns the account key
pub(crate) fn single_saver(end_age: i16) -> (Simulator, ComponentKey) {
    let mut sim = Simulator::new(SimulatorConfig::starting(BEGINNING).with_end_age(end_age));
    sim.add_primary(Person::new(date(1964, 3, 2))).unwrap();
    let k401 = sim
        .add_account(
            Holder::Primary,
            Plan::beginning(BEGINNING, AccountFields::new(AccountKind::Traditional401k)),
        )
        .unwrap();
    (sim, k401)
}

/// $100k job saving 7% with a 3% match into stocks
pub(crate) fn hundred_k_job(account: ComponentKey) -> Plan<JobFields> {
    Plan::beginning(
        BEGINNING,
        JobFields::new(100_000_00, BEGINNING).savings_plan(
            7.0,
            3.0,
            account,
            GrowthCategory::Stocks,
        ),
    )
}
