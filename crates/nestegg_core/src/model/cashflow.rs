//! Per-month cash-flow line items

use std::iter::Sum;

use serde::{Deserialize, Serialize};

/// Named monetary line items for one holder over one period (minor units).
///
/// Ledgers accumulate these month by month; `merge` sums every line item so
/// monthly records fold into an annual total in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cashflow {
    pub pretax_gross: i64,
    pub pretax_salary: i64,
    pub pretax_savings: i64,
    pub pretax_savings_matched: i64,
    pub pretax_savings_withdrawal: i64,
    pub pretax_ss: i64,
    pub pretax_adjusted: i64,
    pub tax_withholding: i64,
    pub take_home_pay: i64,
}

/// Raw wage income for one pay period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WageIncome {
    pub wages: i64,
    pub saved: i64,
    pub matched: i64,
    pub pay_period: PayPeriod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayPeriod {
    Monthly,
}

impl Cashflow {
    /// W-2 wages: employer match counts toward gross, employee savings come
    /// out before withholding.
    pub fn from_wages(income: &WageIncome, withholding_rate: f64) -> Self {
        let pretax_adjusted = income.wages - income.saved;
        let tax_withholding = withholding(pretax_adjusted, income.pay_period, withholding_rate);
        Self {
            pretax_gross: income.wages + income.matched,
            pretax_salary: income.wages,
            pretax_savings: income.saved,
            pretax_savings_matched: income.matched,
            pretax_adjusted,
            tax_withholding,
            take_home_pay: pretax_adjusted - tax_withholding,
            ..Self::default()
        }
    }

    /// Social-security benefit, currently passed through without withholding
    pub fn from_social_security(benefit: i64) -> Self {
        Self {
            pretax_gross: benefit,
            pretax_ss: benefit,
            pretax_adjusted: benefit,
            take_home_pay: benefit,
            ..Self::default()
        }
    }

    /// Withdrawal from a pre-tax savings account
    pub fn from_savings_withdrawal(amount: i64) -> Self {
        Self {
            pretax_gross: amount,
            pretax_savings_withdrawal: amount,
            pretax_adjusted: amount,
            take_home_pay: amount,
            ..Self::default()
        }
    }

    pub fn merge(&mut self, other: &Cashflow) {
        self.pretax_gross += other.pretax_gross;
        self.pretax_salary += other.pretax_salary;
        self.pretax_savings += other.pretax_savings;
        self.pretax_savings_matched += other.pretax_savings_matched;
        self.pretax_savings_withdrawal += other.pretax_savings_withdrawal;
        self.pretax_ss += other.pretax_ss;
        self.pretax_adjusted += other.pretax_adjusted;
        self.tax_withholding += other.tax_withholding;
        self.take_home_pay += other.take_home_pay;
    }

    #[must_use]
    pub fn merged(mut self, other: &Cashflow) -> Self {
        self.merge(other);
        self
    }
}

impl<'a> Sum<&'a Cashflow> for Cashflow {
    fn sum<I: Iterator<Item = &'a Cashflow>>(iter: I) -> Self {
        iter.fold(Cashflow::default(), |acc, c| acc.merged(c))
    }
}

/// Placeholder withholding: a flat share of adjusted income, floored.
///
/// Ideally this would use W-4 allowances and brackets for the pay period.
fn withholding(adjusted_income: i64, _pay_period: PayPeriod, rate: f64) -> i64 {
    (adjusted_income as f64 * rate).floor() as i64
}
