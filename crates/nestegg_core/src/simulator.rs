//! Plan assembly and the year-stepped simulation loop
//!
//! A [`Simulator`] moves through `Unconfigured -> Finalized -> Simulating ->
//! Done`. Components can only be added while unconfigured; finalizing
//! validates the plan, fixes the horizon and materializes one generator per
//! component. Each `simulate` call then runs against its own
//! [`SimulationRun`], which owns every growth-rate dependent cache and is
//! dropped when the run ends.

use std::collections::BTreeSet;
use std::rc::Rc;

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

use crate::components::{
    AccountFields, BenefitClaim, Component, ComponentKind, JobFields, PlanComponent,
    SocialSecurityFields, SpendingFields, claim_month,
};
use crate::config::{Plan, PlanReader, SimulatorConfig};
use crate::date_math::year_start;
use crate::error::{Result, SetupError};
use crate::generator::{GenerationContext, Generator, GeneratorBody};
use crate::model::{
    ComponentKey, CompoundingCache, GrowthRateSet, GrowthRates, Holder, InflatingInt, Person,
};
use crate::state::State;
use crate::transform::{Transform, sort_transforms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Finalized,
    Simulating,
    Done,
}

#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    phase: Phase,
    people: [Option<Person>; 2],
    components: Vec<PlanComponent>,
    generators: Vec<Generator>,
    end_date: Option<Date>,
}

impl Simulator {
    pub fn new(config: SimulatorConfig) -> Self {
        Self {
            config,
            phase: Phase::Unconfigured,
            people: [None, None],
            components: Vec::new(),
            generators: Vec::new(),
            end_date: None,
        }
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn person(&self, holder: Holder) -> Option<&Person> {
        self.people[holder.index()].as_ref()
    }

    pub fn components(&self) -> &[PlanComponent] {
        &self.components
    }

    pub fn generators(&self) -> &[Generator] {
        &self.generators
    }

    /// First date past the horizon, known once finalized
    pub fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Calendar years from the beginning year to the horizon end
    pub fn horizon_years(&self) -> Option<usize> {
        self.end_date
            .map(|end| (end.year() - self.config.beginning.year()).max(0) as usize)
    }

    fn ensure_unconfigured(&self) -> std::result::Result<(), SetupError> {
        if self.phase == Phase::Unconfigured {
            Ok(())
        } else {
            Err(SetupError::PlanFinalized)
        }
    }

    pub fn add_primary(&mut self, person: Person) -> std::result::Result<(), SetupError> {
        self.add_person(Holder::Primary, person)
    }

    pub fn add_partner(&mut self, person: Person) -> std::result::Result<(), SetupError> {
        self.add_person(Holder::Partner, person)
    }

    fn add_person(&mut self, holder: Holder, person: Person) -> std::result::Result<(), SetupError> {
        self.ensure_unconfigured()?;
        self.people[holder.index()] = Some(person);
        Ok(())
    }

    fn add(
        &mut self,
        holder: Holder,
        component: Component,
    ) -> std::result::Result<ComponentKey, SetupError> {
        self.ensure_unconfigured()?;
        let key = u16::try_from(self.components.len())
            .map(ComponentKey)
            .map_err(|_| SetupError::TooManyComponents)?;
        self.components.push(PlanComponent {
            key,
            holder,
            component,
        });
        Ok(key)
    }

    pub fn add_account(
        &mut self,
        holder: Holder,
        plan: Plan<AccountFields>,
    ) -> std::result::Result<ComponentKey, SetupError> {
        self.add(holder, Component::Account(plan))
    }

    pub fn add_job(
        &mut self,
        holder: Holder,
        plan: Plan<JobFields>,
    ) -> std::result::Result<ComponentKey, SetupError> {
        self.add(holder, Component::Job(plan))
    }

    /// The plan's start date is the claim date
    pub fn add_social_security(
        &mut self,
        holder: Holder,
        plan: Plan<SocialSecurityFields>,
    ) -> std::result::Result<ComponentKey, SetupError> {
        self.add(holder, Component::SocialSecurity(plan))
    }

    /// Spending is a household decision; it is recorded under the primary
    pub fn add_spending_strategy(
        &mut self,
        plan: Plan<SpendingFields>,
    ) -> std::result::Result<ComponentKey, SetupError> {
        self.add(Holder::Primary, Component::SpendingStrategy(plan))
    }

    /// Monthly household take-home pay at the beginning date, from jobs only
    pub fn initial_take_home_pay(&self) -> i64 {
        self.components
            .iter()
            .filter_map(|c| match &c.component {
                Component::Job(plan) => fields_at(plan, self.config.beginning),
                _ => None,
            })
            .map(|fields| fields.estimated_take_home(self.config.withholding_rate))
            .sum()
    }

    pub fn finalize_plan(&mut self) -> std::result::Result<(), SetupError> {
        self.ensure_unconfigured()?;
        let youngest = match &self.people {
            [None, None] => return Err(SetupError::NoPerson),
            [None, Some(_)] => return Err(SetupError::NoPrimaryPerson),
            [Some(primary), partner] => partner
                .iter()
                .map(|p| p.birthday)
                .fold(primary.birthday, Date::max),
        };
        self.validate_components()?;

        let generators = self
            .components
            .iter()
            .map(|c| self.materialize(c))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.generators = generators.into_iter().flatten().collect();

        let end_date = year_start(youngest.year() + self.config.end_age + 1);
        self.end_date = Some(end_date);
        self.phase = Phase::Finalized;
        info!(
            components = self.components.len(),
            generators = self.generators.len(),
            end = %end_date,
            "plan finalized"
        );
        Ok(())
    }

    fn validate_components(&self) -> std::result::Result<(), SetupError> {
        let accounts: BTreeSet<ComponentKey> = self
            .components
            .iter()
            .filter(|c| c.component.kind() == ComponentKind::Account)
            .map(|c| c.key)
            .collect();

        for c in &self.components {
            if self.person(c.holder).is_none() {
                return Err(SetupError::PersonMissing(c.holder));
            }
            match &c.component {
                Component::Job(plan) => {
                    let unknown = plan
                        .changes()
                        .iter()
                        .flat_map(|(_, fields)| &fields.savings_plans)
                        .find(|sp| !accounts.contains(&sp.account));
                    if let Some(sp) = unknown {
                        return Err(SetupError::UnknownAccount {
                            component: c.key,
                            account: sp.account,
                        });
                    }
                }
                Component::SocialSecurity(plan) if plan.start_date().is_none() => {
                    return Err(SetupError::MissingClaimDate(c.key));
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn materialize(
        &self,
        c: &PlanComponent,
    ) -> std::result::Result<Option<Generator>, SetupError> {
        let generator = match &c.component {
            Component::Account(_) => None,
            Component::Job(plan) => Some(Generator::new(
                c.key,
                c.holder,
                plan.start_date(),
                plan.end_date(),
                GeneratorBody::Wages(plan.clone()),
            )),
            Component::SocialSecurity(plan) => Some(self.benefit_generator(c, plan)?),
            Component::SpendingStrategy(plan) => Some(Generator::new(
                c.key,
                c.holder,
                plan.start_date(),
                plan.end_date(),
                GeneratorBody::Spending(plan.clone()),
            )),
        };
        Ok(generator)
    }

    /// Benefits are paid from the first whole month on or after the claim
    /// date
    fn benefit_generator(
        &self,
        c: &PlanComponent,
        plan: &Plan<SocialSecurityFields>,
    ) -> std::result::Result<Generator, SetupError> {
        let start = plan
            .start_date()
            .ok_or(SetupError::MissingClaimDate(c.key))?;
        let person = self
            .person(c.holder)
            .ok_or(SetupError::PersonMissing(c.holder))?;
        let claim = BenefitClaim {
            birthday: person.birthday,
            claim_month: claim_month(start),
            fra_pia: fields_at(plan, start).and_then(|f| f.fra_pia),
            salaries: self.salaries_of(c.holder),
        };
        Ok(Generator::new(
            c.key,
            c.holder,
            Some(claim.claim_month),
            plan.end_date(),
            GeneratorBody::Benefit(claim),
        ))
    }

    /// Base salaries of the holder's jobs, as declared at the beginning date
    fn salaries_of(&self, holder: Holder) -> Vec<InflatingInt> {
        self.components
            .iter()
            .filter(|c| c.holder == holder)
            .filter_map(|c| match &c.component {
                Component::Job(plan) => fields_at(plan, self.config.beginning).map(|f| f.base),
                _ => None,
            })
            .collect()
    }

    /// Open a run under one growth-rate scenario
    pub fn start_run(&self, rates: GrowthRates) -> std::result::Result<SimulationRun<'_>, SetupError> {
        let end_date = match (self.phase, self.end_date) {
            (Phase::Unconfigured, _) | (_, None) => return Err(SetupError::NotFinalized),
            (_, Some(end)) => end,
        };
        Ok(SimulationRun {
            simulator: self,
            end_date,
            rates: GrowthRateSet::new(rates, self.config.beginning.year()),
            compounding: CompoundingCache::new(),
            benefits: FxHashMap::default(),
            transforms: FxHashMap::default(),
        })
    }

    /// Simulate the whole horizon, finalizing first if needed.
    ///
    /// Returns one state per year step, preceded by the initial state.
    pub fn simulate(&mut self, rates: GrowthRates) -> Result<Vec<State>> {
        if self.phase == Phase::Unconfigured {
            self.finalize_plan()?;
        }
        self.phase = Phase::Simulating;
        let states = match self.start_run(rates) {
            Ok(run) => run.run(),
            Err(err) => Err(err.into()),
        };
        self.phase = if states.is_ok() {
            Phase::Done
        } else {
            Phase::Finalized
        };
        states
    }
}

/// Fields in effect on `date`, or the first declaration for plans that begin
/// later
fn fields_at<F>(plan: &Plan<F>, date: Date) -> Option<&F> {
    plan.fields_on(date)
        .or_else(|| plan.changes().first().map(|(_, fields)| fields))
}

/// One growth-rate scenario's pass over the horizon
pub struct SimulationRun<'s> {
    simulator: &'s Simulator,
    end_date: Date,
    rates: GrowthRateSet,
    compounding: CompoundingCache,
    benefits: FxHashMap<ComponentKey, InflatingInt>,
    transforms: FxHashMap<(Date, Date, ComponentKey), Rc<[Transform]>>,
}

impl<'s> SimulationRun<'s> {
    pub fn rates(&self) -> &GrowthRateSet {
        &self.rates
    }

    pub fn compounding(&self) -> &CompoundingCache {
        &self.compounding
    }

    /// Number of (window, component) transform sets generated so far
    pub fn cached_transform_sets(&self) -> usize {
        self.transforms.len()
    }

    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Accounts at their opening balances on the beginning date
    pub fn initial_state(&self) -> State {
        let config = &self.simulator.config;
        let accounts = self.simulator.components.iter().filter_map(|c| match &c.component {
            Component::Account(plan) => plan
                .changes()
                .first()
                .map(|(_, fields)| fields.open(c.key, c.holder, config.beginning)),
            _ => None,
        });
        State::new(config.beginning, accounts, config.withholding_rate)
    }

    /// One component's transforms for `[from, to)`, generated at most once
    fn component_transforms(
        &mut self,
        generator: &Generator,
        from: Date,
        to: Date,
    ) -> Result<Rc<[Transform]>> {
        let key = (from, to, generator.component());
        if let Some(cached) = self.transforms.get(&key) {
            return Ok(Rc::clone(cached));
        }
        let mut ctx = GenerationContext {
            config: &self.simulator.config,
            rates: &self.rates,
            compounding: &mut self.compounding,
            benefits: &mut self.benefits,
        };
        let transforms: Rc<[Transform]> = generator.bounded_transforms(from, to, &mut ctx)?.into();
        self.transforms.insert(key, Rc::clone(&transforms));
        Ok(transforms)
    }

    /// Every component's transforms for `[from, to)` in application order
    pub fn plan_transforms(&mut self, from: Date, to: Date) -> Result<Vec<Transform>> {
        let simulator = self.simulator;
        let mut transforms = Vec::new();
        for generator in &simulator.generators {
            transforms.extend(self.component_transforms(generator, from, to)?.iter().cloned());
        }
        sort_transforms(&mut transforms);
        Ok(transforms)
    }

    /// Derive the state for the calendar-year window starting at
    /// `state.date()`
    pub fn step(&mut self, state: &State) -> Result<State> {
        let from = state.date();
        let to = year_start(from.year() + 1).min(self.end_date);
        let transforms = self.plan_transforms(from, to)?;
        debug!(%from, %to, transforms = transforms.len(), "simulating window");

        let mut next = state.init_next();
        for transform in &transforms {
            transform.apply_to(&mut next)?;
        }
        next.pass_time(to, &self.rates);
        Ok(next)
    }

    /// Step from the initial state to the horizon end
    pub fn run(mut self) -> Result<Vec<State>> {
        let mut state = self.initial_state();
        let mut states = Vec::new();
        while state.date() < self.end_date {
            let next = self.step(&state)?;
            states.push(std::mem::replace(&mut state, next));
        }
        states.push(state);

        if let Some(last) = states.last() {
            info!(
                years = states.len() - 1,
                end = %last.date(),
                net_worth = last.net_worth(),
                "simulation complete"
            );
        }
        Ok(states)
    }
}
