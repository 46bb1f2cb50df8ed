//! Year stepping, wage transforms and growth

use jiff::civil::date;

use super::{BEGINNING, flat_rates, hundred_k_job, single_saver};
use crate::components::{AccountFields, ComponentKind};
use crate::config::{Plan, SimulatorConfig};
use crate::model::{AccountKind, ComponentKey, GrowthCategory, GrowthRates, Holder, Person};
use crate::simulator::Simulator;
use crate::transform::{Transform, TransformKind, sort_transforms};

/// One year of a $100k job produces 12 identical monthly wage transforms
#[test]
fn test_one_year_of_wages() {
    let (mut sim, k401) = single_saver(61);
    sim.add_job(Holder::Primary, hundred_k_job(k401)).unwrap();
    sim.finalize_plan().unwrap();

    let mut run = sim.start_run(flat_rates(1.0)).unwrap();
    let transforms = run.plan_transforms(BEGINNING, date(2026, 1, 1)).unwrap();
    assert_eq!(transforms.len(), 12);
    for (month, t) in transforms.iter().enumerate() {
        assert_eq!(t.date, date(2025, month as i8 + 1, 1));
        assert_eq!(t.payload, transforms[0].payload);
    }
    let TransformKind::Wages { income, credits } = &transforms[0].payload else {
        panic!("expected wages, got {:?}", transforms[0].payload);
    };
    assert_eq!(income.wages, 833_333);
    assert_eq!(income.saved, 58_333);
    assert_eq!(income.matched, 24_999);
    assert_eq!(credits[0].amount, 83_332);
    drop(run);

    let states = sim.simulate(flat_rates(1.0)).unwrap();
    assert_eq!(states.len(), 2);
    let account = states[1].account(k401).unwrap();
    assert_eq!(account.balance(GrowthCategory::Stocks), 12 * (58_333 + 24_999));

    let cashflow = states[1].merged_cashflow(Holder::Primary);
    assert_eq!(cashflow.pretax_salary, 12 * 833_333);
    assert_eq!(cashflow.pretax_savings, 12 * 58_333);
    assert_eq!(cashflow.pretax_savings_matched, 12 * 24_999);
}

/// Neutral growth and no activity leave balances untouched for decades
#[test]
fn test_neutral_growth_preserves_balances() {
    let mut sim = Simulator::new(SimulatorConfig::starting(BEGINNING).with_end_age(80));
    sim.add_primary(Person::new(date(1964, 3, 2))).unwrap();
    sim.add_account(
        Holder::Primary,
        Plan::beginning(
            BEGINNING,
            AccountFields::new(AccountKind::Brokerage)
                .holding(GrowthCategory::Stocks, 300_000_00)
                .holding(GrowthCategory::Bonds, 200_000_00),
        ),
    )
    .unwrap();

    let states = sim.simulate(flat_rates(1.0)).unwrap();
    assert_eq!(states.len(), 21);
    assert!(states.iter().all(|s| s.net_worth() == 500_000_00));
}

/// Each state starts where the previous one ended, through the horizon
#[test]
fn test_states_form_a_chain() {
    let mut sim = Simulator::new(SimulatorConfig::starting(date(2025, 7, 15)).with_end_age(65));
    sim.add_primary(Person::new(date(1964, 3, 2))).unwrap();
    let states = sim.simulate(GrowthRates::new()).unwrap();

    assert_eq!(states[0].date(), date(2025, 7, 15));
    for pair in states.windows(2) {
        assert_eq!(pair[1].from(), pair[0].date());
        assert!(pair[1].date() > pair[0].date());
    }
    assert_eq!(states.last().unwrap().date(), date(2030, 1, 1));
    assert_eq!(sim.end_date(), Some(date(2030, 1, 1)));
}

/// Growth accrues once per year step, after that year's credits
#[test]
fn test_growth_applies_after_credits() {
    let (mut sim, k401) = single_saver(62);
    sim.add_job(Holder::Primary, hundred_k_job(k401)).unwrap();
    let rates = GrowthRates::from([(GrowthCategory::Stocks, vec![1.5, 1.0])]);
    let states = sim.simulate(rates).unwrap();

    let first_year = 12 * 83_332;
    let after_growth = (first_year as f64 * 1.5).floor() as i64;
    assert_eq!(
        states[1].account(k401).unwrap().balance(GrowthCategory::Stocks),
        after_growth
    );
    assert_eq!(
        states[2].account(k401).unwrap().balance(GrowthCategory::Stocks),
        after_growth + first_year
    );
}

/// Wage growth compounds the base salary from the following year
#[test]
fn test_wage_growth_raises_later_paychecks() {
    let (mut sim, k401) = single_saver(62);
    sim.add_job(Holder::Primary, hundred_k_job(k401)).unwrap();
    let rates = GrowthRates::from([(GrowthCategory::WageGrowth, vec![1.5])]);
    let states = sim.simulate(rates).unwrap();

    assert_eq!(states[1].merged_cashflow(Holder::Primary).pretax_salary, 12 * 833_333);
    assert_eq!(states[2].merged_cashflow(Holder::Primary).pretax_salary, 12 * 1_250_000);
}

/// A window's transforms are generated once per run and reused after
#[test]
fn test_transform_sets_are_cached_per_window() {
    let (mut sim, k401) = single_saver(61);
    sim.add_job(Holder::Primary, hundred_k_job(k401)).unwrap();
    sim.finalize_plan().unwrap();

    let mut run = sim.start_run(GrowthRates::new()).unwrap();
    let first = run.plan_transforms(BEGINNING, date(2026, 1, 1)).unwrap();
    assert_eq!(run.cached_transform_sets(), 1);
    let again = run.plan_transforms(BEGINNING, date(2026, 1, 1)).unwrap();
    assert_eq!(run.cached_transform_sets(), 1);
    assert_eq!(first, again);

    run.plan_transforms(date(2026, 1, 1), date(2027, 1, 1)).unwrap();
    assert_eq!(run.cached_transform_sets(), 2);
}

/// Different scenarios never share compounded values
#[test]
fn test_scenarios_do_not_share_caches() {
    let (mut sim, k401) = single_saver(62);
    sim.add_job(Holder::Primary, hundred_k_job(k401)).unwrap();

    let low = sim
        .simulate(GrowthRates::from([(GrowthCategory::WageGrowth, vec![1.01])]))
        .unwrap();
    let high = sim
        .simulate(GrowthRates::from([(GrowthCategory::WageGrowth, vec![1.25])]))
        .unwrap();
    let low_again = sim
        .simulate(GrowthRates::from([(GrowthCategory::WageGrowth, vec![1.01])]))
        .unwrap();

    let salary = |states: &[crate::state::State]| {
        states[2].merged_cashflow(Holder::Primary).pretax_salary
    };
    assert_eq!(salary(&low), 12 * (10_100_000 / 12));
    assert_eq!(salary(&high), 12 * (12_500_000 / 12));
    assert_eq!(low, low_again);
}

fn transform(date: jiff::civil::Date, kind: ComponentKind, component: u16, seq: u32) -> Transform {
    Transform {
        date,
        holder: Holder::Primary,
        component: ComponentKey(component),
        kind,
        seq,
        payload: TransformKind::SocialSecurity { benefit: 1 },
    }
}

/// Same-date transforms order by kind, then component, then emission
#[test]
fn test_sort_is_total_and_stable() {
    let day = date(2031, 3, 1);
    let input = vec![
        transform(day, ComponentKind::SpendingStrategy, 0, 0),
        transform(date(2031, 2, 1), ComponentKind::SpendingStrategy, 0, 0),
        transform(day, ComponentKind::SocialSecurity, 5, 0),
        transform(day, ComponentKind::Job, 7, 1),
        transform(day, ComponentKind::Job, 7, 0),
        transform(day, ComponentKind::Job, 2, 3),
    ];

    let mut sorted = input.clone();
    sort_transforms(&mut sorted);
    let keys: Vec<_> = sorted.iter().map(|t| (t.date, t.kind, t.component.0, t.seq)).collect();
    assert_eq!(
        keys,
        vec![
            (date(2031, 2, 1), ComponentKind::SpendingStrategy, 0, 0),
            (day, ComponentKind::Job, 2, 3),
            (day, ComponentKind::Job, 7, 0),
            (day, ComponentKind::Job, 7, 1),
            (day, ComponentKind::SocialSecurity, 5, 0),
            (day, ComponentKind::SpendingStrategy, 0, 0),
        ]
    );

    let mut reversed: Vec<_> = input.into_iter().rev().collect();
    sort_transforms(&mut reversed);
    assert_eq!(sorted, reversed);
}
