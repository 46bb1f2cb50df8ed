//! W-2 jobs with employer savings plans

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{
    ComponentKey, CompoundingCache, GrowthCategory, GrowthRateSet, InflatingInt, PayPeriod,
    WageIncome,
};
use crate::transform::AccountCredit;

/// Payroll savings into one account holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsPlan {
    /// Employee contribution, percent of wages
    pub percent: f64,
    /// Employer match, percent of wages
    #[serde(default)]
    pub match_percent: f64,
    pub account: ComponentKey,
    pub holding: GrowthCategory,
}

impl SavingsPlan {
    fn saved(&self, wages: i64) -> i64 {
        (wages as f64 * self.percent / 100.0).floor() as i64
    }

    fn matched(&self, wages: i64) -> i64 {
        (wages as f64 * self.match_percent / 100.0).floor() as i64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFields {
    /// Annual base salary, growing with wages
    pub base: InflatingInt,
    #[serde(default)]
    pub savings_plans: Vec<SavingsPlan>,
}

impl JobFields {
    /// `base` is the annual salary in cents as of `date`
    pub fn new(base: i64, date: Date) -> Self {
        Self {
            base: InflatingInt::wages(base, date),
            savings_plans: Vec::new(),
        }
    }

    #[must_use]
    pub fn savings_plan(
        mut self,
        percent: f64,
        match_percent: f64,
        account: ComponentKey,
        holding: GrowthCategory,
    ) -> Self {
        self.savings_plans.push(SavingsPlan {
            percent,
            match_percent,
            account,
            holding,
        });
        self
    }

    /// One month of wages paid on `date`, plus the account credits its
    /// savings plans make.
    pub fn paycheck(
        &self,
        date: Date,
        rates: &GrowthRateSet,
        cache: &mut CompoundingCache,
    ) -> (WageIncome, Vec<AccountCredit>) {
        let wages = self.base.on(date, rates, cache).div_euclid(12);
        let mut saved = 0;
        let mut matched = 0;
        let credits = self
            .savings_plans
            .iter()
            .map(|plan| {
                let employee = plan.saved(wages);
                let employer = plan.matched(wages);
                saved += employee;
                matched += employer;
                AccountCredit {
                    account: plan.account,
                    holding: plan.holding,
                    amount: employee + employer,
                }
            })
            .collect();

        let income = WageIncome {
            wages,
            saved,
            matched,
            pay_period: PayPeriod::Monthly,
        };
        (income, credits)
    }

    /// Rough monthly take-home from the unadjusted base, rounding each term
    pub fn estimated_take_home(&self, withholding_rate: f64) -> i64 {
        let monthly = (self.base.initial_value() as f64 / 12.0).round() as i64;
        let savings: i64 = self
            .savings_plans
            .iter()
            .map(|plan| (plan.percent / 100.0 * monthly as f64).round() as i64)
            .sum();
        let withholding = (withholding_rate * monthly as f64).round() as i64;
        monthly - savings - withholding
    }
}
