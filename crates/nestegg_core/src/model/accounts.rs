//! Account snapshots owned by a simulation state
//!
//! An account holds one balance per holding (a growth category such as
//! stocks or bonds). Each [`State`](crate::state::State) owns its own copies;
//! advancing a year clones every snapshot before anything is applied.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::growth::{GrowthCategory, GrowthRateSet};
use super::ids::{ComponentKey, Holder};
use crate::date_math::{days_in_year, fast_days_between, year_start};

/// Tax treatment of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Employer plan, contributions pre-tax
    Traditional401k,
    /// Individual plan, contributions pre-tax
    TraditionalIra,
    Roth,
    Brokerage,
}

impl AccountKind {
    pub fn is_pretax(self) -> bool {
        matches!(self, AccountKind::Traditional401k | AccountKind::TraditionalIra)
    }
}

/// Point-in-time balances of one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    pub key: ComponentKey,
    pub holder: Holder,
    pub kind: AccountKind,
    /// Date up to which growth has been accrued
    pub as_of: Date,
    pub balances: BTreeMap<GrowthCategory, i64>,
}

impl AccountSnapshot {
    pub fn total(&self) -> i64 {
        self.balances.values().sum()
    }

    pub fn balance(&self, holding: GrowthCategory) -> i64 {
        self.balances.get(&holding).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, holding: GrowthCategory, amount: i64) {
        *self.balances.entry(holding).or_insert(0) += amount;
    }

    /// Remove up to `amount` across holdings in holding order.
    ///
    /// Balances never go negative; returns the amount actually removed.
    pub fn debit(&mut self, amount: i64) -> i64 {
        let mut remaining = amount;
        for balance in self.balances.values_mut() {
            if remaining <= 0 {
                break;
            }
            let taken = remaining.min((*balance).max(0));
            *balance -= taken;
            remaining -= taken;
        }
        amount - remaining
    }

    /// Accrue each holding's growth from `as_of` up to `to`.
    ///
    /// Growth is applied one calendar-year segment at a time; a partial year
    /// compounds the annual multiplier by the elapsed fraction of that year.
    pub fn pass_time(&mut self, to: Date, rates: &GrowthRateSet) {
        while self.as_of < to {
            let year = self.as_of.year();
            let segment_end = to.min(year_start(year + 1));
            let days = fast_days_between(self.as_of, segment_end);
            let fraction = f64::from(days) / f64::from(days_in_year(year));

            for (&holding, balance) in self.balances.iter_mut() {
                let multiplier = rates.annually(holding, year);
                let factor = if days == days_in_year(year) {
                    multiplier
                } else {
                    multiplier.powf(fraction)
                };
                *balance = (*balance as f64 * factor).floor() as i64;
            }
            self.as_of = segment_end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GrowthRates;
    use jiff::civil::date;

    fn account() -> AccountSnapshot {
        AccountSnapshot {
            key: ComponentKey(0),
            holder: Holder::Primary,
            kind: AccountKind::Traditional401k,
            as_of: date(2025, 1, 1),
            balances: BTreeMap::from([
                (GrowthCategory::Stocks, 300_000_00),
                (GrowthCategory::Bonds, 200_000_00),
            ]),
        }
    }

    #[test]
    fn test_debit_drains_holdings_in_order() {
        let mut a = account();
        assert_eq!(a.debit(350_000_00), 350_000_00);
        assert_eq!(a.balance(GrowthCategory::Stocks), 0);
        assert_eq!(a.balance(GrowthCategory::Bonds), 150_000_00);
    }

    #[test]
    fn test_debit_caps_at_balance() {
        let mut a = account();
        assert_eq!(a.debit(600_000_00), 500_000_00);
        assert_eq!(a.total(), 0);
    }

    #[test]
    fn test_pass_time_full_year() {
        let mut a = account();
        let rates = GrowthRateSet::new(
            GrowthRates::from([
                (GrowthCategory::Stocks, vec![1.5]),
                (GrowthCategory::Bonds, vec![1.25]),
            ]),
            2025,
        );
        a.pass_time(date(2026, 1, 1), &rates);
        assert_eq!(a.balance(GrowthCategory::Stocks), 450_000_00);
        assert_eq!(a.balance(GrowthCategory::Bonds), 250_000_00);
        assert_eq!(a.as_of, date(2026, 1, 1));
    }

    #[test]
    fn test_pass_time_neutral_is_unchanged() {
        let mut a = account();
        a.pass_time(date(2031, 7, 19), &GrowthRateSet::neutral(2025));
        assert_eq!(a.total(), 500_000_00);
    }

    fn stocks_at(multiplier: f64) -> GrowthRateSet {
        GrowthRateSet::new(
            GrowthRates::from([(GrowthCategory::Stocks, vec![multiplier; 2])]),
            2025,
        )
    }

    #[test]
    fn test_pass_time_partial_year() {
        let mut a = account();
        a.as_of = date(2025, 7, 2);
        a.pass_time(date(2026, 1, 1), &stocks_at(1.10));
        // 183 of 365 days: 1.10^(183/365)
        assert_eq!(a.balance(GrowthCategory::Stocks), 314_683_73);
        assert_eq!(a.balance(GrowthCategory::Bonds), 200_000_00);
        assert_eq!(a.as_of, date(2026, 1, 1));
    }

    #[test]
    fn test_pass_time_from_jan_first() {
        let mut a = account();
        a.pass_time(date(2026, 1, 1), &stocks_at(1.10));
        assert_eq!(a.balance(GrowthCategory::Stocks), 330_000_00);

        let mut a = account();
        a.pass_time(date(2025, 7, 2), &stocks_at(1.10));
        // 182 of 365 days
        assert_eq!(a.balance(GrowthCategory::Stocks), 314_601_57);
    }
}
