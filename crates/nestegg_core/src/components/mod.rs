//! Plan components
//!
//! Components are a closed set of kinds. Each kind owns a field struct read
//! through a [`Plan`]; all but accounts materialize a
//! [`Generator`](crate::generator::Generator) at finalize.

mod account;
mod job;
mod social_security;
mod spending;

pub use account::AccountFields;
pub use job::{JobFields, SavingsPlan};
pub use social_security::{BenefitClaim, SocialSecurityFields, claim_month};
pub use spending::{SpendingFields, SpendingStrategy};

use serde::{Deserialize, Serialize};

use crate::config::Plan;
use crate::model::{ComponentKey, Holder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Account,
    Job,
    SocialSecurity,
    SpendingStrategy,
}

impl ComponentKind {
    /// Order among transforms sharing a date. Income lands before spending
    /// looks at the month's take-home pay.
    pub fn priority(self) -> u8 {
        match self {
            ComponentKind::Job => 0,
            ComponentKind::SocialSecurity => 1,
            ComponentKind::SpendingStrategy => 2,
            ComponentKind::Account => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Account(Plan<AccountFields>),
    Job(Plan<JobFields>),
    SocialSecurity(Plan<SocialSecurityFields>),
    SpendingStrategy(Plan<SpendingFields>),
}

impl Component {
    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Account(_) => ComponentKind::Account,
            Component::Job(_) => ComponentKind::Job,
            Component::SocialSecurity(_) => ComponentKind::SocialSecurity,
            Component::SpendingStrategy(_) => ComponentKind::SpendingStrategy,
        }
    }
}

/// A component registered with a simulator
#[derive(Debug, Clone, PartialEq)]
pub struct PlanComponent {
    pub key: ComponentKey,
    pub holder: Holder,
    pub component: Component,
}
