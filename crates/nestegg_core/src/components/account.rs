use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::model::{AccountKind, AccountSnapshot, ComponentKey, GrowthCategory, Holder};

/// Account fields: tax treatment and opening balance per holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountFields {
    pub kind: AccountKind,
    #[serde(default)]
    pub holdings: BTreeMap<GrowthCategory, i64>,
}

impl AccountFields {
    pub fn new(kind: AccountKind) -> Self {
        Self {
            kind,
            holdings: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn holding(mut self, category: GrowthCategory, amount: i64) -> Self {
        *self.holdings.entry(category).or_insert(0) += amount;
        self
    }

    /// Snapshot seeded with these balances as of `date`
    pub fn open(&self, key: ComponentKey, holder: Holder, date: Date) -> AccountSnapshot {
        AccountSnapshot {
            key,
            holder,
            kind: self.kind,
            as_of: date,
            balances: self.holdings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_open_seeds_balances() {
        let fields = AccountFields::new(AccountKind::Traditional401k)
            .holding(GrowthCategory::Stocks, 300_000_00)
            .holding(GrowthCategory::Bonds, 200_000_00)
            .holding(GrowthCategory::Stocks, 1_00);
        let account = fields.open(ComponentKey(2), Holder::Partner, date(2025, 1, 1));
        assert_eq!(account.balance(GrowthCategory::Stocks), 300_001_00);
        assert_eq!(account.total(), 500_001_00);
        assert_eq!(account.holder, Holder::Partner);
        assert!(account.kind.is_pretax());
    }
}
