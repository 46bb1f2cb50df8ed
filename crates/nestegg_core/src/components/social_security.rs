//! Social-security claims
//!
//! The benefit is priced once per run, the first time a window reaches the
//! claim month, then paid monthly as an amount that grows with inflation.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SimulatorConfig;
use crate::date_math::next_month_start;
use crate::error::SimulationError;
use crate::model::{ComponentKey, CompoundingCache, GrowthRateSet, InflatingInt};
use crate::social_security::{BenefitCalculator, SalaryEstimate};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialSecurityFields {
    /// Known monthly benefit at full retirement age (cents). When absent the
    /// benefit is estimated from the holder's salaries.
    #[serde(default)]
    pub fra_pia: Option<i64>,
}

impl SocialSecurityFields {
    pub fn estimated() -> Self {
        Self::default()
    }

    pub fn with_fra_pia(fra_pia: i64) -> Self {
        Self {
            fra_pia: Some(fra_pia),
        }
    }
}

/// First month benefits are paid for a plan starting on `start`
pub fn claim_month(start: Date) -> Date {
    if start.day() == 1 {
        start
    } else {
        next_month_start(start)
    }
}

/// Inputs gathered at finalize for pricing one claim
#[derive(Debug, Clone, PartialEq)]
pub struct BenefitClaim {
    pub birthday: Date,
    pub claim_month: Date,
    pub fra_pia: Option<i64>,
    /// Base salaries of every job the claimant holds
    pub salaries: Vec<InflatingInt>,
}

impl BenefitClaim {
    pub fn calculator(
        &self,
        config: &SimulatorConfig,
        rates: &GrowthRateSet,
        cache: &mut CompoundingCache,
    ) -> BenefitCalculator {
        let calculator = BenefitCalculator::new(self.birthday, self.claim_month);
        match self.fra_pia {
            Some(pia) => calculator.with_fra_pia(pia),
            None => {
                let current_salary = self
                    .salaries
                    .iter()
                    .map(|base| base.on(config.beginning, rates, cache))
                    .sum();
                calculator.with_salary_estimate(SalaryEstimate {
                    current_salary,
                    annual_raise: config.estimated_annual_raise,
                    as_of_year: config.estimation_year(),
                })
            }
        }
    }

    /// Monthly benefit as an amount inflating from the claim month
    pub fn monthly_benefit(
        &self,
        component: ComponentKey,
        config: &SimulatorConfig,
        rates: &GrowthRateSet,
        cache: &mut CompoundingCache,
    ) -> Result<InflatingInt, SimulationError> {
        let benefit = self
            .calculator(config, rates, cache)
            .calculate_benefit()
            .map_err(|source| SimulationError::Benefit { component, source })?;
        debug!(%component, claim = %self.claim_month, benefit, "priced social security claim");
        Ok(InflatingInt::inflation(benefit, self.claim_month))
    }
}
