//! Integer amounts that compound once a year under a growth category

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::growth::{GrowthCategory, GrowthRateSet, ScenarioKey};

/// A seed amount (minor units) that compounds annually after its start year.
///
/// For any year at or before the start year the value is the seed; for a
/// later year it is the previous year's value times that previous year's
/// multiplier, floored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InflatingInt {
    seed: i64,
    start_date: Date,
    category: GrowthCategory,
}

impl InflatingInt {
    pub fn new(seed: i64, start_date: Date, category: GrowthCategory) -> Self {
        Self {
            seed,
            start_date,
            category,
        }
    }

    /// Amount that tracks consumer prices
    pub fn inflation(seed: i64, start_date: Date) -> Self {
        Self::new(seed, start_date, GrowthCategory::Inflation)
    }

    /// Amount that tracks wage growth
    pub fn wages(seed: i64, start_date: Date) -> Self {
        Self::new(seed, start_date, GrowthCategory::WageGrowth)
    }

    pub fn initial_value(&self) -> i64 {
        self.seed
    }

    pub fn start_date(&self) -> Date {
        self.start_date
    }

    pub fn category(&self) -> GrowthCategory {
        self.category
    }

    /// Compounded value valid for `date.year()`
    pub fn on(&self, date: Date, rates: &GrowthRateSet, cache: &mut CompoundingCache) -> i64 {
        self.for_year(date.year(), rates, cache)
    }

    pub fn for_year(&self, year: i16, rates: &GrowthRateSet, cache: &mut CompoundingCache) -> i64 {
        let start_year = self.start_date.year();
        if year <= start_year {
            return self.seed;
        }

        let years = cache.years_mut(*self, rates.hash_key(self.category));
        if let Some(&value) = years.get(&year) {
            return value;
        }

        // Resume from the latest cached year below the target
        let mut known = year - 1;
        while known > start_year && !years.contains_key(&known) {
            known -= 1;
        }
        let mut value = if known <= start_year {
            self.seed
        } else {
            years[&known]
        };

        for y in (known + 1)..=year {
            value = (value as f64 * rates.annually(self.category, y - 1)).floor() as i64;
            years.insert(y, value);
        }
        value
    }
}

/// Compounded values memoised per amount, then per scenario, then per year.
///
/// One cache belongs to one simulation run and is dropped with it.
#[derive(Debug, Default)]
pub struct CompoundingCache {
    entries: FxHashMap<(InflatingInt, ScenarioKey), FxHashMap<i16, i64>>,
}

impl CompoundingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn years_mut(&mut self, amount: InflatingInt, key: &ScenarioKey) -> &mut FxHashMap<i16, i64> {
        self.entries.entry((amount, key.clone())).or_default()
    }

    /// Number of (amount, scenario) series held
    pub fn series_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of memoised years across all series
    pub fn cached_years(&self) -> usize {
        self.entries.values().map(FxHashMap::len).sum()
    }
}
