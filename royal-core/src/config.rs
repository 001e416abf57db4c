//! Selection configuration
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AVAILABLE_YEARS, DEFAULT_TARGET_COUNT};
use crate::years::YearFilter;

const DEFAULT_SELECTION_DATA: &str =
    include_str!("../../royal-web/static/assets/data/selection.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_available_years")]
    pub available_years: Vec<String>,
    /// Years active at session start; `None` selects the whole range.
    #[serde(default)]
    pub default_selected: Option<Vec<String>>,
    #[serde(default = "default_target_count")]
    pub target_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("selection config JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("selection config lists no years")]
    NoYears,
    #[error("selection config lists year {0} twice")]
    DuplicateYear(String),
    #[error("selection config target count must be positive")]
    ZeroTarget,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            available_years: default_available_years(),
            default_selected: None,
            target_count: default_target_count(),
        }
    }
}

impl SelectionConfig {
    /// Parse and validate a configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed, the year range is empty
    /// or repeats a label, or the target count is zero.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.available_years.is_empty() {
            return Err(ConfigError::NoYears);
        }
        for (idx, year) in self.available_years.iter().enumerate() {
            if self.available_years[..idx].contains(year) {
                return Err(ConfigError::DuplicateYear(year.clone()));
            }
        }
        if self.target_count == 0 {
            return Err(ConfigError::ZeroTarget);
        }
        Ok(())
    }

    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_SELECTION_DATA).unwrap_or_default()
    }

    /// Filter state a new session starts with.
    #[must_use]
    pub fn initial_filter(&self) -> YearFilter {
        match &self.default_selected {
            Some(selected) => YearFilter::with_selected(&self.available_years, selected),
            None => YearFilter::new(&self.available_years),
        }
    }
}

fn default_available_years() -> Vec<String> {
    DEFAULT_AVAILABLE_YEARS
        .iter()
        .map(ToString::to_string)
        .collect()
}

const fn default_target_count() -> usize {
    DEFAULT_TARGET_COUNT
}
