//! User settings for budget-pace
//!
//! Manages display preferences and the lookback windows used by the
//! velocity and trend reports.

use serde::{Deserialize, Serialize};

use super::paths::PacePaths;
use crate::error::PaceError;

/// How far back the analytics look
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Prior weeks compared by the spending velocity report
    #[serde(default = "default_four")]
    pub velocity_lookback_weeks: u32,

    /// Prior full weeks averaged for weekly category trends
    #[serde(default = "default_four")]
    pub trend_lookback_weeks: u32,

    /// Prior budget months averaged for monthly category trends
    #[serde(default = "default_three")]
    pub trend_lookback_months: u32,
}

fn default_four() -> u32 {
    4
}

fn default_three() -> u32 {
    3
}

/// Longest lookback accepted for either week setting
pub const MAX_LOOKBACK_WEEKS: u32 = 52;

/// Longest lookback accepted for monthly trends
pub const MAX_LOOKBACK_MONTHS: u32 = 24;

impl AnalyticsSettings {
    /// Reject lookbacks of zero or beyond a year of weeks / two years of months
    pub fn validate(&self) -> Result<(), PaceError> {
        let checks = [
            ("velocity_lookback_weeks", self.velocity_lookback_weeks, MAX_LOOKBACK_WEEKS),
            ("trend_lookback_weeks", self.trend_lookback_weeks, MAX_LOOKBACK_WEEKS),
            ("trend_lookback_months", self.trend_lookback_months, MAX_LOOKBACK_MONTHS),
        ];
        for (field, value, max) in checks {
            if !(1..=max).contains(&value) {
                return Err(PaceError::Config(format!(
                    "analytics.{} must be between 1 and {}, got {}",
                    field, max, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            velocity_lookback_weeks: default_four(),
            trend_lookback_weeks: default_four(),
            trend_lookback_months: default_three(),
        }
    }
}

/// User settings for budget-pace
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Analytics lookback windows
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            analytics: AnalyticsSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &PacePaths) -> Result<Self, PaceError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| PaceError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                PaceError::Config(format!("Failed to parse settings file: {}", e))
            })?;
            settings.analytics.validate()?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PacePaths) -> Result<(), PaceError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PaceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| PaceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
