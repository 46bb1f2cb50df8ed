//! Validity-windowed transform producers
//!
//! Every component except accounts owns one [`Generator`]. A generator only
//! ever emits transforms dated inside both the requested window and its own
//! validity window, one per first-of-month.

use jiff::civil::Date;
use rustc_hash::FxHashMap;

use crate::components::{BenefitClaim, ComponentKind, JobFields, SpendingFields};
use crate::config::{Plan, PlanReader, SimulatorConfig};
use crate::date_math::month_starts;
use crate::error::Result;
use crate::model::{ComponentKey, CompoundingCache, GrowthRateSet, Holder, InflatingInt};
use crate::transform::{Transform, TransformKind};

/// Run-scoped inputs shared by every generator
pub struct GenerationContext<'a> {
    pub config: &'a SimulatorConfig,
    pub rates: &'a GrowthRateSet,
    pub compounding: &'a mut CompoundingCache,
    /// Priced benefits, one per social-security component
    pub benefits: &'a mut FxHashMap<ComponentKey, InflatingInt>,
}

/// What a generator emits each month
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorBody {
    Wages(Plan<JobFields>),
    Benefit(BenefitClaim),
    Spending(Plan<SpendingFields>),
}

impl GeneratorBody {
    pub fn kind(&self) -> ComponentKind {
        match self {
            GeneratorBody::Wages(_) => ComponentKind::Job,
            GeneratorBody::Benefit(_) => ComponentKind::SocialSecurity,
            GeneratorBody::Spending(_) => ComponentKind::SpendingStrategy,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    component: ComponentKey,
    holder: Holder,
    start_date: Option<Date>,
    end_date: Option<Date>,
    body: GeneratorBody,
}

impl Generator {
    pub fn new(
        component: ComponentKey,
        holder: Holder,
        start_date: Option<Date>,
        end_date: Option<Date>,
        body: GeneratorBody,
    ) -> Self {
        Self {
            component,
            holder,
            start_date,
            end_date,
            body,
        }
    }

    pub fn component(&self) -> ComponentKey {
        self.component
    }

    pub fn holder(&self) -> Holder {
        self.holder
    }

    pub fn kind(&self) -> ComponentKind {
        self.body.kind()
    }

    pub fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// True when `[from, to)` cannot overlap the validity window
    pub fn out_of_range(&self, from: Date, to: Date) -> bool {
        self.start_date.is_some_and(|start| to < start)
            || self.end_date.is_some_and(|end| from >= end)
    }

    /// Transforms dated in `[from, to)` and inside the validity window, in
    /// emission order.
    pub fn bounded_transforms(
        &self,
        from: Date,
        to: Date,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Vec<Transform>> {
        if self.out_of_range(from, to) {
            return Ok(Vec::new());
        }
        let from = self.start_date.map_or(from, |start| from.max(start));
        let to = self.end_date.map_or(to, |end| to.min(end));
        self.transforms(from, to, ctx)
    }

    fn transforms(
        &self,
        from: Date,
        to: Date,
        ctx: &mut GenerationContext<'_>,
    ) -> Result<Vec<Transform>> {
        let mut payloads = Vec::new();
        match &self.body {
            GeneratorBody::Wages(plan) => {
                for date in month_starts(from, to) {
                    let Some(fields) = plan.fields_on(date) else {
                        continue;
                    };
                    let (income, credits) = fields.paycheck(date, ctx.rates, ctx.compounding);
                    payloads.push((date, TransformKind::Wages { income, credits }));
                }
            }
            GeneratorBody::Benefit(claim) => {
                for date in month_starts(from, to) {
                    let amount = self.benefit(claim, ctx)?;
                    let benefit = amount.on(date, ctx.rates, ctx.compounding);
                    payloads.push((date, TransformKind::SocialSecurity { benefit }));
                }
            }
            GeneratorBody::Spending(plan) => {
                for date in month_starts(from, to) {
                    let target = plan
                        .fields_on(date)
                        .and_then(|fields| fields.target(date, ctx.rates, ctx.compounding));
                    if let Some(target) = target {
                        payloads.push((date, TransformKind::Spending { target }));
                    }
                }
            }
        }

        Ok(payloads
            .into_iter()
            .enumerate()
            .map(|(seq, (date, payload))| Transform {
                date,
                holder: self.holder,
                component: self.component,
                kind: self.kind(),
                seq: seq as u32,
                payload,
            })
            .collect())
    }

    fn benefit(&self, claim: &BenefitClaim, ctx: &mut GenerationContext<'_>) -> Result<InflatingInt> {
        if let Some(amount) = ctx.benefits.get(&self.component) {
            return Ok(*amount);
        }
        let amount = claim.monthly_benefit(self.component, ctx.config, ctx.rates, ctx.compounding)?;
        ctx.benefits.insert(self.component, amount);
        Ok(amount)
    }
}
