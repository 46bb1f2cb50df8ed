//! Benefit calculator scenarios

use jiff::civil::date;

use crate::error::BenefitError;
use crate::social_security::{BenefitCalculator, SalaryEstimate};

fn claim(start: jiff::civil::Date) -> BenefitCalculator {
    BenefitCalculator::new(date(1964, 3, 2), start).with_fra_pia(1_000_00)
}

/// Claiming at the full retirement month pays the PIA as is
#[test]
fn test_full_retirement_month_pays_pia() {
    let calc = claim(date(2031, 3, 1));
    assert_eq!(calc.full_retirement_month(), date(2031, 3, 1));
    assert_eq!(calc.retirement_multiplier(), 100.0);
    assert_eq!(calc.calculate_benefit(), Ok(1_000_00));
}

/// A claim date mid-month counts from the first of that month
#[test]
fn test_start_truncated_to_month() {
    let calc = claim(date(2031, 3, 20));
    assert_eq!(calc.start_month(), date(2031, 3, 1));
    assert_eq!(calc.calculate_benefit(), Ok(1_000_00));
}

/// 36 months early: 5/9 of 1% per month
#[test]
fn test_thirty_six_months_early() {
    let calc = claim(date(2028, 3, 1));
    assert_eq!(calc.retirement_multiplier(), 80.0);
    // PIA de-indexed by three 2.6% adjustments, then reduced
    assert_eq!(calc.primary_insurance_amount(), Ok(92_587));
    assert_eq!(calc.calculate_benefit(), Ok(74_069));
}

/// Beyond 36 months early: an extra 5/12 of 1% per month
#[test]
fn test_forty_eight_months_early() {
    let calc = claim(date(2027, 3, 1));
    assert_eq!(calc.retirement_multiplier(), 75.0);
    assert_eq!(calc.primary_insurance_amount(), Ok(90_240));
    assert_eq!(calc.calculate_benefit(), Ok(67_680));
}

/// 12 months late for a post-1942 cohort: 16/24 of 1% per month
#[test]
fn test_twelve_months_late() {
    let calc = claim(date(2032, 3, 1));
    assert!((calc.retirement_multiplier() - 108.0).abs() < 1e-9);
    assert_eq!(calc.primary_insurance_amount(), Ok(102_600));
    assert_eq!(calc.calculate_benefit(), Ok(110_808));
}

/// Earlier cohorts earn smaller delayed credits
#[test]
fn test_delay_credit_for_transition_cohort() {
    let calc = BenefitCalculator::new(date(1940, 8, 10), date(2007, 2, 1)).with_fra_pia(1_000_00);
    assert_eq!(calc.full_retirement_month(), date(2006, 2, 1));
    assert!((calc.retirement_multiplier() - (100.0 + 12.0 * 14.0 / 24.0)).abs() < 1e-9);
}

#[test]
fn test_claim_before_minimum_fails() {
    let calc = claim(date(2026, 2, 1));
    assert_eq!(
        calc.calculate_benefit(),
        Err(BenefitError::StartBeforeMinimum {
            start: date(2026, 2, 1),
            min: date(2026, 3, 1),
        })
    );
    assert!(claim(date(2026, 3, 1)).calculate_benefit().is_ok());
}

#[test]
fn test_claim_after_maximum_fails() {
    let calc = claim(date(2034, 4, 1));
    assert_eq!(
        calc.calculate_benefit(),
        Err(BenefitError::StartAfterMaximum {
            start: date(2034, 4, 1),
            max: date(2034, 3, 1),
        })
    );
    assert!(claim(date(2034, 3, 1)).calculate_benefit().is_ok());
}

/// $100k in 2025 growing 2% a year, claimed at full retirement
#[test]
fn test_estimated_pia() {
    let calc = BenefitCalculator::new(date(1964, 3, 2), date(2031, 3, 1)).with_salary_estimate(
        SalaryEstimate {
            current_salary: 100_000_00,
            annual_raise: 1.02,
            as_of_year: 2025,
        },
    );
    assert_eq!(calc.bend_points(), Ok([113_709, 685_415]));

    let history = calc.salary_history(&SalaryEstimate {
        current_salary: 100_000_00,
        annual_raise: 1.02,
        as_of_year: 2025,
    });
    assert_eq!(history.keys().next(), Some(&1982));
    assert_eq!(history.keys().last(), Some(&2031));
    assert_eq!(history[&2026], 102_000_00);

    assert_eq!(calc.primary_insurance_amount(), Ok(409_490));
    assert_eq!(calc.calculate_benefit(), Ok(409_490));
}

/// An estimate claimed early is reduced like a supplied PIA
#[test]
fn test_estimated_pia_claimed_early() {
    let estimate = SalaryEstimate {
        current_salary: 100_000_00,
        annual_raise: 1.02,
        as_of_year: 2025,
    };
    let at_frm = BenefitCalculator::new(date(1964, 3, 2), date(2031, 3, 1))
        .with_salary_estimate(estimate)
        .calculate_benefit()
        .unwrap();
    let early = BenefitCalculator::new(date(1964, 3, 2), date(2028, 3, 1))
        .with_salary_estimate(estimate)
        .calculate_benefit()
        .unwrap();
    assert!(early < at_frm);
    assert!(early > at_frm / 2);
}
