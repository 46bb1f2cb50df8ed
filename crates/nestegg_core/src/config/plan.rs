//! Time-indexed plan fields
//!
//! A plan records what a component's fields are from a given date onward,
//! plus an optional validity window. The engine only ever reads it through
//! [`PlanReader`].
//!
//! ```ignore
//! let plan = Plan::beginning(date(2025, 1, 1), JobFields::new(base, date(2025, 1, 1)))
//!     .update(date(2027, 1, 1), |f| f.savings_plans.clear())
//!     .stop(date(2031, 3, 1));
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Read access to a component's declared field changes
pub trait PlanReader<F> {
    /// Fields in effect on `date`, or `None` before the first declaration
    fn fields_on(&self, date: Date) -> Option<&F>;

    /// First date the component is active, if bounded
    fn start_date(&self) -> Option<Date>;

    /// First date the component is no longer active, if bounded
    fn end_date(&self) -> Option<Date>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan<F> {
    /// Sorted by date, at most one entry per date
    changes: Vec<(Date, F)>,
    start_date: Option<Date>,
    end_date: Option<Date>,
}

impl<F> Plan<F> {
    /// Declare the fields in effect from `date`
    pub fn beginning(date: Date, fields: F) -> Self {
        Self {
            changes: vec![(date, fields)],
            start_date: None,
            end_date: None,
        }
    }

    /// Replace the fields from `date` onward
    #[must_use]
    pub fn on(mut self, date: Date, fields: F) -> Self {
        match self.changes.binary_search_by(|(d, _)| d.cmp(&date)) {
            Ok(i) => self.changes[i].1 = fields,
            Err(i) => self.changes.insert(i, (date, fields)),
        }
        self
    }

    #[must_use]
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    #[must_use]
    pub fn stop(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    pub fn changes(&self) -> &[(Date, F)] {
        &self.changes
    }
}

impl<F: Clone> Plan<F> {
    /// Copy the fields in effect on `date`, modify them and declare the
    /// result from `date` onward.
    #[must_use]
    pub fn update(self, date: Date, change: impl FnOnce(&mut F)) -> Self {
        let Some(mut fields) = self.fields_on(date).cloned() else {
            return self;
        };
        change(&mut fields);
        self.on(date, fields)
    }
}

impl<F> PlanReader<F> for Plan<F> {
    fn fields_on(&self, date: Date) -> Option<&F> {
        let idx = self.changes.partition_point(|(d, _)| *d <= date);
        idx.checked_sub(1).map(|i| &self.changes[i].1)
    }

    fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    fn end_date(&self) -> Option<Date> {
        self.end_date
    }
}
