//! User settings for Tally
//!
//! Stored as config.json in the base directory. Every field has a serde
//! default so older or hand-edited files still load.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::TallyPaths;
use crate::error::{TallyError, TallyResult};
use crate::models::Money;

/// User settings for Tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether mutations are written to the audit log
    #[serde(default = "default_audit_log")]
    pub audit_log: bool,
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

fn default_audit_log() -> bool {
    true
}

/// Whether chrono can render dates with `format`
fn is_valid_date_format(format: &str) -> bool {
    !format.trim().is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            audit_log: default_audit_log(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    ///
    /// Defaults are not written; callers decide when to persist.
    pub fn load_or_create(paths: &TallyPaths) -> TallyResult<Self> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| TallyError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| TallyError::Config(format!("Failed to parse settings file: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            warn!(
                date_format = %settings.date_format,
                "invalid date format in settings file, using the default"
            );
            settings.date_format = default_date_format();
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> TallyResult<()> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| TallyError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Change one setting by its config.json key
    pub fn set(&mut self, key: &str, value: &str) -> TallyResult<()> {
        match key {
            "currency_symbol" => {
                if value.trim().is_empty() {
                    return Err(TallyError::Config("Currency symbol cannot be empty".into()));
                }
                self.currency_symbol = value.trim().to_string();
            }
            "date_format" => {
                if !is_valid_date_format(value) {
                    return Err(TallyError::Config(format!(
                        "Invalid date format '{}'",
                        value
                    )));
                }
                self.date_format = value.to_string();
            }
            "audit_log" => {
                self.audit_log = match value.trim().to_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => true,
                    "false" | "off" | "no" | "0" => false,
                    other => {
                        return Err(TallyError::Config(format!(
                            "Expected on/off for audit_log, got '{}'",
                            other
                        )))
                    }
                };
            }
            other => {
                return Err(TallyError::Config(format!("Unknown setting '{}'", other)));
            }
        }
        Ok(())
    }

    /// Format a date with the configured format, or as YYYY-MM-DD if the
    /// configured format cannot be rendered
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_err() {
            out = date.to_string();
        }
        out
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}
