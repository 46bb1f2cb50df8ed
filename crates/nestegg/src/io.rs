//! Scenario files and output writing
//!
//! Growth rates are read from YAML of the form
//!
//! ```yaml
//! years: 60
//! rates:
//!   stocks: 1.06
//!   inflation: [1.03, 1.025, 1.02]
//! ```
//!
//! A constant rate expands to `years` entries. A series is used as given;
//! years past its end grow at the neutral multiplier.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use nestegg_core::model::{GrowthCategory, GrowthRates, ScenarioProfile};
use serde::Deserialize;

/// Horizon used for constant rates when a file does not name one
pub const DEFAULT_YEARS: usize = 100;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Constant(f64),
    Series(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GrowthRatesFile {
    #[serde(default)]
    pub years: Option<usize>,
    pub rates: BTreeMap<GrowthCategory, RateValue>,
}

impl GrowthRatesFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn into_rates(self) -> GrowthRates {
        let years = self.years.unwrap_or(DEFAULT_YEARS);
        self.rates
            .into_iter()
            .map(|(category, value)| {
                let series = match value {
                    RateValue::Constant(m) => vec![m; years],
                    RateValue::Series(values) => values,
                };
                (category, series)
            })
            .collect()
    }
}

pub fn load_growth_rates(path: &Path) -> color_eyre::Result<GrowthRates> {
    let content = fs::read_to_string(path)?;
    let file = GrowthRatesFile::from_yaml(&content)?;
    tracing::debug!(path = %path.display(), categories = file.rates.len(), "loaded growth rates");
    Ok(file.into_rates())
}

pub fn load_profile(path: &Path) -> color_eyre::Result<ScenarioProfile> {
    let content = fs::read_to_string(path)?;
    let profile: ScenarioProfile = serde_saphyr::from_str(&content)?;
    tracing::debug!(path = %path.display(), categories = profile.profiles.len(), "loaded scenario profile");
    Ok(profile)
}

/// Write content to a file atomically using write-then-rename pattern.
///
/// The content is first written to a sibling `.tmp` file, then renamed over
/// the target, so readers never see a partial report.
pub fn atomic_write(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nestegg_core::model::GrowthProfile;
    use tempfile::tempdir;

    #[test]
    fn test_constant_and_series_rates() {
        let yaml = "years: 3\nrates:\n  stocks: 1.06\n  inflation: [1.03, 1.02]\n";
        let rates = GrowthRatesFile::from_yaml(yaml).unwrap().into_rates();
        assert_eq!(rates[&GrowthCategory::Stocks], vec![1.06; 3]);
        assert_eq!(rates[&GrowthCategory::Inflation], vec![1.03, 1.02]);
        assert!(!rates.contains_key(&GrowthCategory::Bonds));
    }

    #[test]
    fn test_default_years() {
        let rates = GrowthRatesFile::from_yaml("rates:\n  bonds: 1.04\n")
            .unwrap()
            .into_rates();
        assert_eq!(rates[&GrowthCategory::Bonds].len(), DEFAULT_YEARS);
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(GrowthRatesFile::from_yaml("rates:\n  gold: 1.1\n").is_err());
    }

    #[test]
    fn test_load_files() {
        let dir = tempdir().unwrap();
        let rates_path = dir.path().join("rates.yaml");
        fs::write(&rates_path, "years: 2\nrates:\n  wage_growth: 1.01\n").unwrap();
        let rates = load_growth_rates(&rates_path).unwrap();
        assert_eq!(rates[&GrowthCategory::WageGrowth], vec![1.01, 1.01]);

        let profile_path = dir.path().join("profile.yaml");
        fs::write(
            &profile_path,
            "profiles:\n  stocks:\n    type: Fixed\n    multiplier: 1.05\n  bonds:\n    type: Neutral\n",
        )
        .unwrap();
        let profile = load_profile(&profile_path).unwrap();
        assert_eq!(
            profile.profiles[&GrowthCategory::Stocks],
            GrowthProfile::Fixed { multiplier: 1.05 }
        );
        assert_eq!(profile.profiles[&GrowthCategory::Bonds], GrowthProfile::Neutral);
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");

        atomic_write(&path, "first").unwrap();
        atomic_write(&path, "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }
}
