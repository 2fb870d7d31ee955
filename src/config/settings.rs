//! User settings for BudgetIQ
//!
//! Manages display preferences, the month-selection year policy and the
//! default log filter.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::paths::BudgetPaths;
use crate::error::BudgetError;

/// User settings for BudgetIQ
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when displaying amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Year that month names resolve into. `None` means the current calendar year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_year: Option<i32>,

    /// Log filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File name written by the spreadsheet export
    #[serde(default = "default_export_file_name")]
    pub export_file_name: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%d %b %Y".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_export_file_name() -> String {
    crate::export::EXPORT_FILE_NAME.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            reference_year: None,
            log_level: default_log_level(),
            export_file_name: default_export_file_name(),
        }
    }
}

impl Settings {
    /// The year month labels are anchored to
    pub fn effective_year(&self) -> i32 {
        self.reference_year
            .unwrap_or_else(|| chrono::Local::now().date_naive().year())
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
