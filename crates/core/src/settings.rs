use std::collections::HashSet;
use std::num::{NonZeroU32, NonZeroUsize};

use serde::Deserialize;
use thiserror::Error;

use crate::calculator::{CalculatorError, Scenario};

pub const DEFAULT_TOTAL_MODULES: u32 = 7;
pub const DEFAULT_ANNUAL_RATE: f64 = 0.08;
pub const DEFAULT_RECENT_SEARCH_LIMIT: usize = 5;
pub const DEFAULT_SEARCH_PREVIEW_CHARS: usize = 200;
pub const DEFAULT_BOOKMARK_PREVIEW_CHARS: usize = 300;
pub const DEFAULT_START_YEAR: i32 = 2025;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("total module count must be > 0")]
    InvalidTotalModules,
    #[error("recent search limit must be > 0")]
    InvalidRecentSearchLimit,
    #[error("preview length must be > 0")]
    InvalidPreviewLength,
    #[error("duplicate scenario name: {0}")]
    DuplicateScenario(String),
    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}

/// Validated knobs the session and calculator read.
#[derive(Clone, Debug, PartialEq)]
pub struct AcademySettings {
    total_modules: NonZeroU32,
    default_annual_rate: f64,
    scenarios: Vec<Scenario>,
    recent_search_limit: NonZeroUsize,
    search_preview_chars: usize,
    bookmark_preview_chars: usize,
    projection_start_year: i32,
}

/// Unvalidated settings; every field falls back to its default when absent.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcademySettingsDraft {
    pub total_modules: Option<u32>,
    pub default_annual_rate: Option<f64>,
    pub scenarios: Option<Vec<Scenario>>,
    pub recent_search_limit: Option<usize>,
    pub search_preview_chars: Option<usize>,
    pub bookmark_preview_chars: Option<usize>,
    pub projection_start_year: Option<i32>,
}

impl AcademySettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fill defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` for zero counts or lengths, an invalid rate, or
    /// blank or duplicate scenario names.
    pub fn validate(self) -> Result<AcademySettings, SettingsError> {
        let total_modules = NonZeroU32::new(self.total_modules.unwrap_or(DEFAULT_TOTAL_MODULES))
            .ok_or(SettingsError::InvalidTotalModules)?;

        let default_annual_rate = self.default_annual_rate.unwrap_or(DEFAULT_ANNUAL_RATE);
        if !default_annual_rate.is_finite() || default_annual_rate < 0.0 {
            return Err(CalculatorError::InvalidRate(default_annual_rate).into());
        }

        let scenarios = match self.scenarios {
            Some(list) => list
                .into_iter()
                .map(|s| Scenario::new(s.name, s.annual_rate))
                .collect::<Result<Vec<_>, _>>()?,
            None => default_scenarios(),
        };
        let mut seen = HashSet::new();
        for scenario in &scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(SettingsError::DuplicateScenario(scenario.name.clone()));
            }
        }

        let recent_search_limit =
            NonZeroUsize::new(self.recent_search_limit.unwrap_or(DEFAULT_RECENT_SEARCH_LIMIT))
                .ok_or(SettingsError::InvalidRecentSearchLimit)?;

        let search_preview_chars = self
            .search_preview_chars
            .unwrap_or(DEFAULT_SEARCH_PREVIEW_CHARS);
        let bookmark_preview_chars = self
            .bookmark_preview_chars
            .unwrap_or(DEFAULT_BOOKMARK_PREVIEW_CHARS);
        if search_preview_chars == 0 || bookmark_preview_chars == 0 {
            return Err(SettingsError::InvalidPreviewLength);
        }

        Ok(AcademySettings {
            total_modules,
            default_annual_rate,
            scenarios,
            recent_search_limit,
            search_preview_chars,
            bookmark_preview_chars,
            projection_start_year: self.projection_start_year.unwrap_or(DEFAULT_START_YEAR),
        })
    }
}

fn default_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Not invested".into(),
            annual_rate: 0.0,
        },
        Scenario {
            name: "Safe".into(),
            annual_rate: 0.07,
        },
        Scenario {
            name: "Risky".into(),
            annual_rate: 0.12,
        },
    ]
}

impl AcademySettings {
    #[must_use]
    pub fn total_modules(&self) -> NonZeroU32 {
        self.total_modules
    }

    #[must_use]
    pub fn default_annual_rate(&self) -> f64 {
        self.default_annual_rate
    }

    #[must_use]
    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    #[must_use]
    pub fn recent_search_limit(&self) -> NonZeroUsize {
        self.recent_search_limit
    }

    #[must_use]
    pub fn search_preview_chars(&self) -> usize {
        self.search_preview_chars
    }

    #[must_use]
    pub fn bookmark_preview_chars(&self) -> usize {
        self.bookmark_preview_chars
    }

    #[must_use]
    pub fn projection_start_year(&self) -> i32 {
        self.projection_start_year
    }

    /// Calendar year shown for projection year `year` (1-based).
    #[must_use]
    pub fn calendar_year(&self, year: u32) -> i32 {
        let offset = i32::try_from(year).unwrap_or(i32::MAX).saturating_sub(1);
        self.projection_start_year.saturating_add(offset)
    }
}

impl Default for AcademySettings {
    fn default() -> Self {
        Self {
            total_modules: NonZeroU32::MIN.saturating_add(DEFAULT_TOTAL_MODULES - 1),
            default_annual_rate: DEFAULT_ANNUAL_RATE,
            scenarios: default_scenarios(),
            recent_search_limit: NonZeroUsize::MIN.saturating_add(DEFAULT_RECENT_SEARCH_LIMIT - 1),
            search_preview_chars: DEFAULT_SEARCH_PREVIEW_CHARS,
            bookmark_preview_chars: DEFAULT_BOOKMARK_PREVIEW_CHARS,
            projection_start_year: DEFAULT_START_YEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_draft_yields_defaults() {
        let settings = AcademySettingsDraft::new().validate().unwrap();
        assert_eq!(settings, AcademySettings::default());
        assert_eq!(settings.total_modules().get(), 7);
        assert_eq!(settings.recent_search_limit().get(), 5);
        assert_eq!(settings.scenarios().len(), 3);
    }

    #[test]
    fn zero_total_modules_is_rejected() {
        let draft = AcademySettingsDraft {
            total_modules: Some(0),
            ..AcademySettingsDraft::default()
        };
        assert_eq!(draft.validate(), Err(SettingsError::InvalidTotalModules));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let draft = AcademySettingsDraft {
            default_annual_rate: Some(-0.05),
            ..AcademySettingsDraft::default()
        };
        assert!(matches!(
            draft.validate(),
            Err(SettingsError::Calculator(CalculatorError::InvalidRate(_)))
        ));
    }

    #[test]
    fn duplicate_scenarios_are_rejected() {
        let draft: AcademySettingsDraft = serde_json::from_str(
            r#"{"scenarios": [
                {"name": "Safe", "annual_rate": 0.07},
                {"name": " Safe ", "annual_rate": 0.09}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            draft.validate(),
            Err(SettingsError::DuplicateScenario("Safe".into()))
        );
    }

    #[test]
    fn draft_deserializes_partial_json() {
        let draft: AcademySettingsDraft =
            serde_json::from_str(r#"{"default_annual_rate": 0.1, "projection_start_year": 2030}"#)
                .unwrap();
        let settings = draft.validate().unwrap();
        assert_eq!(settings.default_annual_rate(), 0.1);
        assert_eq!(settings.calendar_year(1), 2030);
        assert_eq!(settings.calendar_year(20), 2049);
    }

    #[test]
    fn unknown_fields_are_refused() {
        assert!(serde_json::from_str::<AcademySettingsDraft>(r#"{"colour": "pink"}"#).is_err());
    }
}
