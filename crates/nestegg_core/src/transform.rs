//! Dated, atomic state mutations
//!
//! Transforms are created by generators and never change afterwards.
//! Applying one to a [`State`] is the only way state evolves.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::components::ComponentKind;
use crate::error::Result;
use crate::model::{ComponentKey, GrowthCategory, Holder, WageIncome};
use crate::state::State;

/// Amount credited to one account holding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCredit {
    pub account: ComponentKey,
    pub holding: GrowthCategory,
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransformKind {
    /// Monthly W-2 wages and the savings they fund
    Wages {
        income: WageIncome,
        credits: Vec<AccountCredit>,
    },
    /// Monthly social-security benefit
    SocialSecurity { benefit: i64 },
    /// Top up the month's household take-home pay to `target` from pre-tax
    /// savings
    Spending { target: i64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub date: Date,
    pub holder: Holder,
    pub component: ComponentKey,
    pub kind: ComponentKind,
    /// Emission order within the component's generator output
    pub seq: u32,
    pub payload: TransformKind,
}

/// Total order over transforms: date, then component kind, then component,
/// then emission order.
pub type SortKey = (Date, u8, ComponentKey, u32);

impl Transform {
    pub fn sort_key(&self) -> SortKey {
        (self.date, self.kind.priority(), self.component, self.seq)
    }

    pub fn apply_to(&self, state: &mut State) -> Result<()> {
        match &self.payload {
            TransformKind::Wages { income, credits } => {
                state.apply_w2_income(self.holder, self.date, income, credits)
            }
            TransformKind::SocialSecurity { benefit } => {
                state.apply_ss_income(self.holder, self.date, *benefit);
                Ok(())
            }
            TransformKind::Spending { target } => self.fund_spending(state, *target),
        }
    }

    fn fund_spending(&self, state: &mut State, target: i64) -> Result<()> {
        let shortfall = target - state.household_take_home(self.date);
        if shortfall <= 0 {
            return Ok(());
        }

        let mut remaining = shortfall;
        for account in state.pretax_accounts() {
            if remaining == 0 {
                break;
            }
            remaining -= state.apply_pretax_savings_withdrawal(account, self.date, remaining)?;
        }
        if remaining > 0 {
            warn!(
                date = %self.date,
                target,
                unfunded = remaining,
                "pre-tax savings exhausted, spending target not met"
            );
        }
        Ok(())
    }
}

/// Stable sort into application order
pub fn sort_transforms(transforms: &mut [Transform]) {
    transforms.sort_by_key(Transform::sort_key);
}
