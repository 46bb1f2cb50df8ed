//! One year-slice of the household's finances
//!
//! States form a chain: [`State::init_next`] derives the next slice with its
//! own copies of every account and an empty ledger, transforms are applied to
//! it, then [`State::pass_time`] accrues growth up to the next boundary.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::Serialize;

use crate::error::{Result, SimulationError};
use crate::model::{
    AccountKind, AccountSnapshot, Cashflow, ComponentKey, GrowthCategory, GrowthRateSet, Holder,
    WageIncome,
};
use crate::transform::AccountCredit;

/// Per-month cash flows of one holder, January first
pub type MonthlyLedger = [Cashflow; 12];

#[derive(Debug, Clone, PartialEq)]
pub struct State {
    from: Date,
    date: Date,
    accounts: BTreeMap<ComponentKey, AccountSnapshot>,
    ledger: [MonthlyLedger; 2],
    withholding_rate: f64,
}

impl State {
    pub fn new(
        date: Date,
        accounts: impl IntoIterator<Item = AccountSnapshot>,
        withholding_rate: f64,
    ) -> Self {
        Self {
            from: date,
            date,
            accounts: accounts.into_iter().map(|a| (a.key, a)).collect(),
            ledger: [[Cashflow::default(); 12]; 2],
            withholding_rate,
        }
    }

    /// Start of the slice
    pub fn from(&self) -> Date {
        self.from
    }

    /// End of the slice; the next slice starts here
    pub fn date(&self) -> Date {
        self.date
    }

    pub fn accounts(&self) -> &BTreeMap<ComponentKey, AccountSnapshot> {
        &self.accounts
    }

    pub fn account(&self, key: ComponentKey) -> Option<&AccountSnapshot> {
        self.accounts.get(&key)
    }

    pub fn ledger(&self, holder: Holder) -> &MonthlyLedger {
        &self.ledger[holder.index()]
    }

    pub fn net_worth(&self) -> i64 {
        self.accounts.values().map(AccountSnapshot::total).sum()
    }

    /// Next slice starting at this one's date, with copied accounts and an
    /// empty ledger
    pub fn init_next(&self) -> State {
        State {
            from: self.date,
            date: self.date,
            accounts: self.accounts.clone(),
            ledger: [[Cashflow::default(); 12]; 2],
            withholding_rate: self.withholding_rate,
        }
    }

    fn account_mut(&mut self, key: ComponentKey) -> Result<&mut AccountSnapshot> {
        self.accounts
            .get_mut(&key)
            .ok_or(SimulationError::AccountNotFound(key))
    }

    fn record(&mut self, holder: Holder, date: Date, cashflow: &Cashflow) {
        let month = usize::from(date.month().unsigned_abs()) - 1;
        self.ledger[holder.index()][month].merge(cashflow);
    }

    pub fn apply_w2_income(
        &mut self,
        holder: Holder,
        date: Date,
        income: &WageIncome,
        credits: &[AccountCredit],
    ) -> Result<()> {
        let cashflow = Cashflow::from_wages(income, self.withholding_rate);
        for credit in credits {
            self.account_mut(credit.account)?
                .credit(credit.holding, credit.amount);
        }
        self.record(holder, date, &cashflow);
        Ok(())
    }

    pub fn apply_ss_income(&mut self, holder: Holder, date: Date, benefit: i64) {
        let cashflow = Cashflow::from_social_security(benefit);
        self.record(holder, date, &cashflow);
    }

    /// Withdraw up to `amount` from a pre-tax account, recording it against
    /// the account holder. Returns the amount actually withdrawn.
    pub fn apply_pretax_savings_withdrawal(
        &mut self,
        account: ComponentKey,
        date: Date,
        amount: i64,
    ) -> Result<i64> {
        let snapshot = self.account_mut(account)?;
        let holder = snapshot.holder;
        let withdrawn = snapshot.debit(amount);
        if withdrawn > 0 {
            self.record(holder, date, &Cashflow::from_savings_withdrawal(withdrawn));
        }
        Ok(withdrawn)
    }

    /// Keys of pre-tax accounts, in key order
    pub fn pretax_accounts(&self) -> Vec<ComponentKey> {
        self.accounts
            .values()
            .filter(|a| a.kind.is_pretax())
            .map(|a| a.key)
            .collect()
    }

    /// Take-home pay both holders have recorded so far in `date`'s month
    pub fn household_take_home(&self, date: Date) -> i64 {
        let month = usize::from(date.month().unsigned_abs()) - 1;
        self.ledger.iter().map(|l| l[month].take_home_pay).sum()
    }

    /// Annual total of one holder's ledger
    pub fn merged_cashflow(&self, holder: Holder) -> Cashflow {
        self.ledger[holder.index()].iter().sum()
    }

    /// Advance to `to`, accruing growth on every account
    pub fn pass_time(&mut self, to: Date, rates: &GrowthRateSet) {
        for account in self.accounts.values_mut() {
            account.pass_time(to, rates);
        }
        self.date = to;
    }

    pub fn report(&self) -> StateReport {
        StateReport {
            from: self.from,
            date: self.date,
            net_worth: self.net_worth(),
            accounts: self
                .accounts
                .values()
                .map(|a| {
                    (
                        a.key.to_string(),
                        AccountReport {
                            holder: a.holder,
                            kind: a.kind,
                            balances: a.balances.clone(),
                            total: a.total(),
                        },
                    )
                })
                .collect(),
            cashflow: Holder::ALL
                .iter()
                .map(|&h| (h, self.merged_cashflow(h)))
                .collect(),
        }
    }
}

/// Serializable summary of a [`State`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateReport {
    pub from: Date,
    pub date: Date,
    pub net_worth: i64,
    pub accounts: BTreeMap<String, AccountReport>,
    pub cashflow: BTreeMap<Holder, Cashflow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountReport {
    pub holder: Holder,
    pub kind: AccountKind,
    pub balances: BTreeMap<GrowthCategory, i64>,
    pub total: i64,
}
