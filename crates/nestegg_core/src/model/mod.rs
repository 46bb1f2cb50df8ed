mod accounts;
mod cashflow;
mod growth;
mod ids;
mod inflating;
mod person;
mod profiles;

pub use accounts::{AccountKind, AccountSnapshot};
pub use cashflow::{Cashflow, PayPeriod, WageIncome};
pub use growth::{GrowthCategory, GrowthRateSet, GrowthRates, NEUTRAL_MULTIPLIER, ScenarioKey};
pub use ids::{ComponentKey, Holder};
pub use inflating::{CompoundingCache, InflatingInt};
pub use person::Person;
pub use profiles::{GrowthProfile, ScenarioProfile};
