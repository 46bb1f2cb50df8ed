//! Household spending strategy

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{CompoundingCache, GrowthRateSet, InflatingInt};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpendingStrategy {
    /// Spend whatever take-home pay arrives
    Remainder,
    /// Spend a fixed monthly amount that grows with inflation, withdrawing
    /// from pre-tax savings to cover any shortfall
    Exact { amount: InflatingInt },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingFields {
    pub strategy: SpendingStrategy,
}

impl SpendingFields {
    pub fn remainder() -> Self {
        Self {
            strategy: SpendingStrategy::Remainder,
        }
    }

    /// Spend `monthly` cents in `date` dollars
    pub fn exact(monthly: i64, date: Date) -> Self {
        Self {
            strategy: SpendingStrategy::Exact {
                amount: InflatingInt::inflation(monthly, date),
            },
        }
    }

    /// Monthly spending target on `date`, if the strategy sets one
    pub fn target(
        &self,
        date: Date,
        rates: &GrowthRateSet,
        cache: &mut CompoundingCache,
    ) -> Option<i64> {
        match &self.strategy {
            SpendingStrategy::Remainder => None,
            SpendingStrategy::Exact { amount } => Some(amount.on(date, rates, cache)),
        }
    }
}
