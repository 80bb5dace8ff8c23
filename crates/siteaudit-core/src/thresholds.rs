//! Canonical keyword filtering thresholds and their YAML override loader.
//!
//! Every pipeline stage reads its cut-offs from [`KeywordThresholds`], so a
//! threshold is defined exactly once. A profile file may override any subset
//! of fields; missing fields keep the canonical defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{CompanySize, ConfigError};

/// Inclusive search-volume range a non-branded keyword must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeBand {
    pub min: u64,
    pub max: u64,
}

impl VolumeBand {
    #[must_use]
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, volume: u64) -> bool {
        (self.min..=self.max).contains(&volume)
    }
}

/// Volume bands keyed by company size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VolumeBands {
    pub micro: VolumeBand,
    pub small: VolumeBand,
    pub medium: VolumeBand,
    pub large: VolumeBand,
    pub enterprise: VolumeBand,
}

impl Default for VolumeBands {
    fn default() -> Self {
        Self {
            micro: VolumeBand::new(10, 1_000),
            small: VolumeBand::new(10, 2_500),
            medium: VolumeBand::new(10, 10_000),
            large: VolumeBand::new(10, 50_000),
            enterprise: VolumeBand::new(10, 100_000),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeywordThresholds {
    /// Minimum relevance score for the non-branded list.
    pub min_relevance: f64,
    pub volume_bands: VolumeBands,
    pub max_branded: usize,
    pub max_non_branded: usize,
    pub max_top: usize,
    /// How many of the ranked branded keywords get a SERP-position lookup.
    pub serp_branded_limit: usize,
    /// How many of the ranked non-branded keywords get a SERP-position lookup.
    pub serp_non_branded_limit: usize,
    /// Positions at or above this count as above the fold.
    pub above_fold_max_position: u32,
}

impl Default for KeywordThresholds {
    fn default() -> Self {
        Self {
            min_relevance: 0.5,
            volume_bands: VolumeBands::default(),
            max_branded: 15,
            max_non_branded: 30,
            max_top: 20,
            serp_branded_limit: 5,
            serp_non_branded_limit: 8,
            above_fold_max_position: 3,
        }
    }
}

impl KeywordThresholds {
    #[must_use]
    pub fn volume_band(&self, size: CompanySize) -> VolumeBand {
        match size {
            CompanySize::Micro => self.volume_bands.micro,
            CompanySize::Small => self.volume_bands.small,
            CompanySize::Medium => self.volume_bands.medium,
            CompanySize::Large => self.volume_bands.large,
            CompanySize::Enterprise => self.volume_bands.enterprise,
        }
    }
}

/// Load and validate keyword thresholds from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_thresholds(path: &Path) -> Result<KeywordThresholds, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ThresholdsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_thresholds(&content)
}

/// Parse and validate thresholds from a YAML string.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_thresholds(yaml: &str) -> Result<KeywordThresholds, ConfigError> {
    let thresholds: KeywordThresholds =
        serde_yaml::from_str(yaml).map_err(ConfigError::ThresholdsFileParse)?;
    validate_thresholds(&thresholds)?;
    Ok(thresholds)
}

fn validate_thresholds(thresholds: &KeywordThresholds) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&thresholds.min_relevance) {
        return Err(ConfigError::Validation(format!(
            "min_relevance must be within [0, 1], got {}",
            thresholds.min_relevance
        )));
    }

    let bands = &thresholds.volume_bands;
    for (name, band) in [
        ("micro", bands.micro),
        ("small", bands.small),
        ("medium", bands.medium),
        ("large", bands.large),
        ("enterprise", bands.enterprise),
    ] {
        if band.min > band.max {
            return Err(ConfigError::Validation(format!(
                "volume band '{name}' has min {} above max {}",
                band.min, band.max
            )));
        }
    }

    for (name, cap) in [
        ("max_branded", thresholds.max_branded),
        ("max_non_branded", thresholds.max_non_branded),
        ("max_top", thresholds.max_top),
    ] {
        if cap == 0 {
            return Err(ConfigError::Validation(format!("{name} must be at least 1")));
        }
    }

    Ok(())
}
