//! The built-in two-person household used when no plan file is given

use jiff::civil::{Date, date};
use nestegg_core::components::{AccountFields, JobFields, SocialSecurityFields, SpendingFields};
use nestegg_core::config::{Plan, SimulatorConfig};
use nestegg_core::model::{AccountKind, GrowthCategory, GrowthRates, Holder, Person};
use nestegg_core::{SetupError, Simulator};

/// Share of the initial take-home pay spent each month once the primary retires
const RETIREMENT_SPENDING_SHARE: f64 = 0.8;

pub const BEGINNING: Date = date(2025, 1, 1);

/// Primary retires and claims in March 2031, partner in May 2033
pub fn household(config: SimulatorConfig) -> Result<Simulator, SetupError> {
    let start = config.beginning;
    let primary_retires = date(2031, 3, 1);
    let partner_retires = date(2033, 5, 1);

    let mut sim = Simulator::new(config);
    sim.add_primary(Person::new(date(1964, 3, 2)))?;
    sim.add_partner(Person::new(date(1966, 5, 5)))?;

    let primary_401k = sim.add_account(
        Holder::Primary,
        Plan::beginning(
            start,
            AccountFields::new(AccountKind::Traditional401k)
                .holding(GrowthCategory::Stocks, 300_000_00)
                .holding(GrowthCategory::Bonds, 200_000_00),
        ),
    )?;
    let partner_401k = sim.add_account(
        Holder::Partner,
        Plan::beginning(
            start,
            AccountFields::new(AccountKind::Traditional401k)
                .holding(GrowthCategory::Stocks, 200_000_00),
        ),
    )?;

    sim.add_job(
        Holder::Primary,
        Plan::beginning(
            start,
            JobFields::new(100_000_00, start).savings_plan(
                7.0,
                3.0,
                primary_401k,
                GrowthCategory::Stocks,
            ),
        )
        .stop(primary_retires),
    )?;
    sim.add_job(
        Holder::Partner,
        Plan::beginning(
            start,
            JobFields::new(75_000_00, start).savings_plan(
                7.0,
                3.0,
                partner_401k,
                GrowthCategory::Stocks,
            ),
        )
        .stop(partner_retires),
    )?;

    sim.add_social_security(
        Holder::Primary,
        Plan::beginning(start, SocialSecurityFields::estimated()).start(primary_retires),
    )?;
    sim.add_social_security(
        Holder::Partner,
        Plan::beginning(start, SocialSecurityFields::with_fra_pia(1_000_00))
            .start(partner_retires),
    )?;

    let monthly =
        (sim.initial_take_home_pay() as f64 * RETIREMENT_SPENDING_SHARE).round() as i64;
    sim.add_spending_strategy(Plan::beginning(start, SpendingFields::remainder()).on(
        primary_retires,
        SpendingFields::exact(monthly, primary_retires),
    ))?;

    Ok(sim)
}

/// Steady growth used by `run` when no rates file is given
pub fn default_rates() -> GrowthRates {
    let years = crate::io::DEFAULT_YEARS;
    GrowthRates::from([
        (GrowthCategory::Stocks, vec![1.06; years]),
        (GrowthCategory::Bonds, vec![1.04; years]),
        (GrowthCategory::WageGrowth, vec![1.00; years]),
        (GrowthCategory::Inflation, vec![1.02; years]),
    ])
}
