//! Social-security retirement benefit calculator
//!
//! A [`BenefitCalculator`] turns a date of birth, a claim month and a primary
//! insurance amount (PIA) into the monthly benefit payable from that month.
//! The PIA is either supplied as the full-retirement-age amount or estimated
//! from a projected salary history:
//!
//! 1. Project the current salary back to age 18 and forward to the claim year.
//! 2. Wage-index each year against the age-60 wage index (1.0 from age 61).
//! 3. Average the 35 best indexed years over 420 months (AIME).
//! 4. Apply the 90/32/15 bend-point formula for the age-62 PIA.
//! 5. Carry the PIA forward to the claim year with cost-of-living adjustments.
//!
//! Either PIA is then reduced for an early claim or increased by delayed
//! retirement credits relative to the full retirement month.

pub mod tables;

use std::cell::OnceCell;
use std::collections::BTreeMap;

use jiff::civil::Date;
use tracing::debug;

use crate::date_math::{add_days, month_start, months_between, shift_months, shift_years};
use crate::error::BenefitError;
use tables::{
    BEND_POINTS_1979, DELAY_RATES_24THS, TRANSITION_YEARS, cost_of_living, wage_index,
};

/// Indexed years counted toward AIME
pub const COMPUTATION_YEARS: usize = 35;

/// Inputs for estimating a PIA from a single known salary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryEstimate {
    /// Annual salary in `as_of_year` (cents)
    pub current_salary: i64,
    /// Yearly raise factor, e.g. 1.02
    pub annual_raise: f64,
    pub as_of_year: i16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PiaSource {
    FullRetirementAge(i64),
    Estimated(SalaryEstimate),
}

#[derive(Debug, Clone)]
pub struct BenefitCalculator {
    dob: Date,
    /// The day before the birthday: the day a person legally attains an age
    attained: Date,
    start_month: Date,
    pia: Option<PiaSource>,
    bend_points: OnceCell<[i64; 2]>,
    indexing_factors: OnceCell<BTreeMap<i16, f64>>,
}

impl BenefitCalculator {
    /// `start` is truncated to the first of its month.
    pub fn new(dob: Date, start: Date) -> Self {
        Self {
            dob,
            attained: add_days(dob, -1),
            start_month: month_start(start),
            pia: None,
            bend_points: OnceCell::new(),
            indexing_factors: OnceCell::new(),
        }
    }

    /// Use a known benefit payable at full retirement age (cents per month)
    #[must_use]
    pub fn with_fra_pia(mut self, fra_pia: i64) -> Self {
        self.pia = Some(PiaSource::FullRetirementAge(fra_pia));
        self
    }

    /// Estimate the benefit from a projected salary history
    #[must_use]
    pub fn with_salary_estimate(mut self, estimate: SalaryEstimate) -> Self {
        self.pia = Some(PiaSource::Estimated(estimate));
        self
    }

    pub fn start_month(&self) -> Date {
        self.start_month
    }

    /// Month an unreduced benefit becomes payable
    pub fn full_retirement_month(&self) -> Date {
        let year = self.attained.year();
        let base = month_start(self.attained);
        if year <= 1937 {
            return shift_years(base, 65);
        }
        if (1943..=1954).contains(&year) {
            return shift_years(base, 66);
        }
        if year >= 1960 {
            return shift_years(base, 67);
        }
        match TRANSITION_YEARS.iter().find(|(y, _, _)| *y == year) {
            Some(&(_, years, months)) => shift_months(base, years * 12 + months),
            None => shift_years(base, 65),
        }
    }

    /// Earliest claim month: the first month the person is 62 all month long
    pub fn min_retirement_month(&self) -> Date {
        let age_62 = shift_years(self.attained, 62);
        if age_62.day() == 1 {
            age_62
        } else {
            shift_months(month_start(age_62), 1)
        }
    }

    /// Latest claim month; delayed credits stop accruing at 70
    pub fn max_retirement_month(&self) -> Date {
        shift_years(month_start(self.attained), 70)
    }

    /// Percentage of the PIA payable for the claim month
    pub fn retirement_multiplier(&self) -> f64 {
        let frm = self.full_retirement_month();
        if self.start_month < frm {
            let months = f64::from(months_between(self.start_month, frm));
            if months <= 36.0 {
                100.0 - 5.0 * months / 9.0
            } else {
                100.0 - 20.0 - 5.0 * (months - 36.0) / 12.0
            }
        } else {
            let months = f64::from(months_between(frm, self.start_month));
            100.0 + self.monthly_delay_credit() * months
        }
    }

    /// Delayed retirement credit per month, in percent
    fn monthly_delay_credit(&self) -> f64 {
        let year = self.attained.year();
        let twenty_fourths = if year <= 1924 {
            6
        } else if year >= 1943 {
            16
        } else {
            DELAY_RATES_24THS
                .iter()
                .find(|(y, _)| *y == year)
                .map_or(16, |(_, r)| *r)
        };
        f64::from(twenty_fourths) / 24.0
    }

    /// Monthly benefit (cents) payable from the claim month
    pub fn calculate_benefit(&self) -> Result<i64, BenefitError> {
        let min = self.min_retirement_month();
        if self.start_month < min {
            return Err(BenefitError::StartBeforeMinimum {
                start: self.start_month,
                min,
            });
        }
        let max = self.max_retirement_month();
        if self.start_month > max {
            return Err(BenefitError::StartAfterMaximum {
                start: self.start_month,
                max,
            });
        }

        let pia = self.primary_insurance_amount()?;
        if self.start_month == self.full_retirement_month() {
            return Ok(pia);
        }

        let multiplier = self.retirement_multiplier();
        let benefit = (pia as f64 * multiplier / 100.0).floor() as i64;
        debug!(
            start = %self.start_month,
            pia,
            multiplier,
            benefit,
            "adjusted social security benefit"
        );
        Ok(benefit)
    }

    /// PIA expressed in claim-year dollars, before any early/late adjustment
    pub fn primary_insurance_amount(&self) -> Result<i64, BenefitError> {
        match self.pia {
            Some(PiaSource::FullRetirementAge(fra_pia)) => self.reindex_fra_pia(fra_pia),
            Some(PiaSource::Estimated(estimate)) => self.estimate_pia(&estimate),
            None => Err(BenefitError::MissingPia),
        }
    }

    fn reindex_fra_pia(&self, fra_pia: i64) -> Result<i64, BenefitError> {
        let start_year = self.start_month.year();
        let frm_year = self.full_retirement_month().year();
        let mut pia = fra_pia;
        if start_year < frm_year {
            for year in start_year..frm_year {
                let cola = cola_for(year)?;
                pia = (pia as f64 / ((100.0 + cola) / 100.0)).floor() as i64;
            }
        } else if start_year > frm_year {
            for year in (frm_year + 1)..=start_year {
                pia = apply_cola(pia, cola_for(year - 1)?);
            }
        }
        Ok(pia)
    }

    fn estimate_pia(&self, estimate: &SalaryEstimate) -> Result<i64, BenefitError> {
        let history = self.salary_history(estimate);
        let factors = self.indexing_factors()?;

        let mut indexed: Vec<f64> = history
            .iter()
            .filter_map(|(year, &salary)| factors.get(year).map(|f| salary as f64 * f))
            .collect();
        indexed.sort_by(|a, b| b.total_cmp(a));
        let best: f64 = indexed.iter().take(COMPUTATION_YEARS).sum();
        let aime = (best / (COMPUTATION_YEARS as f64 * 12.0)).floor() as i64;

        let [first, second] = self.bend_points()?;
        let pia_62 = if aime > second {
            0.9 * first as f64 + 0.32 * (second - first) as f64 + 0.15 * (aime - second) as f64
        } else if aime > first {
            0.9 * first as f64 + 0.32 * (aime - first) as f64
        } else {
            0.9 * aime as f64
        }
        .floor() as i64;

        let mut pia = pia_62;
        for year in (self.dob.year() + 63)..=self.start_month.year() {
            pia = apply_cola(pia, cola_for(year - 1)?);
        }
        debug!(aime, pia_62, pia, "estimated primary insurance amount");
        Ok(pia)
    }

    /// Salary per year from age 18 through the later of the estimate year and
    /// the claim year.
    pub fn salary_history(&self, estimate: &SalaryEstimate) -> BTreeMap<i16, i64> {
        let first_year = self.dob.year() + 18;
        let mut history = BTreeMap::from([(estimate.as_of_year, estimate.current_salary)]);

        let mut salary = estimate.current_salary;
        for year in (first_year..estimate.as_of_year).rev() {
            salary = (salary as f64 / estimate.annual_raise).floor() as i64;
            history.insert(year, salary);
        }

        let mut salary = estimate.current_salary;
        for year in (estimate.as_of_year + 1)..=self.start_month.year() {
            salary = (salary as f64 * estimate.annual_raise).floor() as i64;
            history.insert(year, salary);
        }
        history
    }

    /// Bend points for this person's age-62 cohort (cents)
    pub fn bend_points(&self) -> Result<[i64; 2], BenefitError> {
        if let Some(points) = self.bend_points.get() {
            return Ok(*points);
        }
        let ratio = awi_for(self.dob.year() + 62)? as f64 / awi_for(1979)? as f64;
        let points = BEND_POINTS_1979.map(|bend| (bend as f64 * ratio).floor() as i64);
        Ok(*self.bend_points.get_or_init(|| points))
    }

    /// Wage-indexing factor per calendar year of ages 18 through 70
    pub fn indexing_factors(&self) -> Result<&BTreeMap<i16, f64>, BenefitError> {
        if let Some(factors) = self.indexing_factors.get() {
            return Ok(factors);
        }
        let birth_year = self.dob.year();
        let age_60_index = awi_for(birth_year + 60)? as f64;

        let mut factors = BTreeMap::new();
        for age in 18..=60 {
            let year = birth_year + age;
            factors.insert(year, age_60_index / awi_for(year)? as f64);
        }
        for age in 61..=70 {
            factors.insert(birth_year + age, 1.0);
        }
        Ok(self.indexing_factors.get_or_init(|| factors))
    }
}

fn apply_cola(pia: i64, cola: f64) -> i64 {
    (pia as f64 * (100.0 + cola) / 100.0).floor() as i64
}

fn awi_for(year: i16) -> Result<i64, BenefitError> {
    wage_index(year).ok_or(BenefitError::TableOutOfRange {
        table: "average wage index",
        year,
    })
}

fn cola_for(year: i16) -> Result<f64, BenefitError> {
    cost_of_living(year).ok_or(BenefitError::TableOutOfRange {
        table: "cost of living",
        year,
    })
}
