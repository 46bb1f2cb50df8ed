use std::fmt;

use jiff::civil::Date;

use crate::model::{ComponentKey, Holder};

/// Errors raised while assembling or finalizing a plan.
///
/// All of them are fatal to the offending call; a simulator that failed to
/// finalize keeps its unconfigured state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    /// A component or person was added after the plan was finalized, or the
    /// plan was finalized twice.
    PlanFinalized,
    /// Neither a primary nor a partner person was added.
    NoPerson,
    /// A partner exists but no primary person.
    NoPrimaryPerson,
    /// A component is held by a person that was never added.
    PersonMissing(Holder),
    /// A savings plan credits an account that is not part of the plan.
    UnknownAccount {
        component: ComponentKey,
        account: ComponentKey,
    },
    /// A social-security component has no claim (start) date.
    MissingClaimDate(ComponentKey),
    /// A run was requested before the plan was finalized.
    NotFinalized,
    /// Every component key is already in use.
    TooManyComponents,
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::PlanFinalized => write!(f, "plan is already finalized"),
            SetupError::NoPerson => write!(f, "plan has no person"),
            SetupError::NoPrimaryPerson => write!(f, "plan has no primary person"),
            SetupError::PersonMissing(holder) => {
                write!(f, "component held by {holder} but no {holder} person exists")
            }
            SetupError::UnknownAccount { component, account } => {
                write!(f, "component {component} credits unknown account {account}")
            }
            SetupError::MissingClaimDate(key) => {
                write!(f, "social security component {key} has no claim date")
            }
            SetupError::NotFinalized => write!(f, "plan is not finalized"),
            SetupError::TooManyComponents => write!(f, "plan has too many components"),
        }
    }
}

impl std::error::Error for SetupError {}

/// Errors from the social-security benefit calculator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenefitError {
    /// Claim month is earlier than the minimum retirement month (age 62).
    StartBeforeMinimum { start: Date, min: Date },
    /// Claim month is later than the maximum retirement month (age 70).
    StartAfterMaximum { start: Date, max: Date },
    /// Neither a full-retirement-age benefit nor an estimate was provided.
    MissingPia,
    /// A wage-index or cost-of-living lookup fell outside the embedded tables.
    TableOutOfRange { table: &'static str, year: i16 },
}

impl fmt::Display for BenefitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenefitError::StartBeforeMinimum { start, min } => {
                write!(f, "start {start} is less than min {min}")
            }
            BenefitError::StartAfterMaximum { start, max } => {
                write!(f, "start {start} is greater than max {max}")
            }
            BenefitError::MissingPia => write!(f, "primary insurance amount was never set"),
            BenefitError::TableOutOfRange { table, year } => {
                write!(f, "{table} table has no entry for {year}")
            }
        }
    }
}

impl std::error::Error for BenefitError {}

/// Errors related to growth-profile sampling
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    InvalidDistributionParameters {
        profile_type: &'static str,
        location: f64,
        spread: f64,
        reason: &'static str,
    },
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidDistributionParameters {
                profile_type,
                location,
                spread,
                reason,
            } => write!(
                f,
                "invalid {profile_type} parameters ({location}, {spread}): {reason}"
            ),
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Errors that abort a `simulate` call
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    Setup(SetupError),
    Benefit {
        component: ComponentKey,
        source: BenefitError,
    },
    Scenario(ScenarioError),
    /// A transform referenced an account the state does not hold.
    AccountNotFound(ComponentKey),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::Setup(e) => write!(f, "{e}"),
            SimulationError::Benefit { component, source } => {
                write!(f, "benefit for component {component}: {source}")
            }
            SimulationError::Scenario(e) => write!(f, "{e}"),
            SimulationError::AccountNotFound(key) => write!(f, "account {key} not found"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Setup(e) => Some(e),
            SimulationError::Benefit { source, .. } => Some(source),
            SimulationError::Scenario(e) => Some(e),
            SimulationError::AccountNotFound(_) => None,
        }
    }
}

impl From<SetupError> for SimulationError {
    fn from(err: SetupError) -> Self {
        SimulationError::Setup(err)
    }
}

impl From<ScenarioError> for SimulationError {
    fn from(err: ScenarioError) -> Self {
        SimulationError::Scenario(err)
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;
