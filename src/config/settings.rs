//! User settings for BudgetWise export
//!
//! Manages export preferences: date style for CSV artifacts, the default
//! format, and which delivery facilities are configured.

use serde::{Deserialize, Serialize};

use super::paths::BudgetWisePaths;
use crate::error::{BudgetWiseError, BudgetWiseResult};
use crate::export::{DateStyle, ExportFormat, DEFAULT_DATE_FORMAT};
use crate::storage::write_json_atomic;

/// User settings for BudgetWise export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format for CSV rows and the export date (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Format used when none is given on the command line
    #[serde(default)]
    pub default_format: ExportFormat,

    /// Program (and arguments) used to share an artifact, e.g. `xdg-open`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub share_command: Option<String>,

    /// Whether email drafts may be written to the outbox
    #[serde(default = "default_email_enabled")]
    pub email_outbox_enabled: bool,

    /// Recipient used when `--email` is given without one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_recipient: Option<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_email_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            default_format: ExportFormat::default(),
            share_command: None,
            email_outbox_enabled: default_email_enabled(),
            default_recipient: None,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &BudgetWisePaths) -> Result<Self, BudgetWiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BudgetWiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetWiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetWisePaths) -> Result<(), BudgetWiseError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// The validated date style for CSV artifacts
    pub fn date_style(&self) -> BudgetWiseResult<DateStyle> {
        DateStyle::new(self.date_format.clone())
    }
}
