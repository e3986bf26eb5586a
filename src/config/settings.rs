//! User settings for Tally
//!
//! Manages user preferences: reporting granularity, currency symbol and the
//! default import mode.

use serde::{Deserialize, Serialize};

use super::paths::TallyPaths;
use crate::error::TallyError;
use crate::models::ReportingGranularity;
use crate::services::MergeMode;
use crate::storage::file_io::{read_json_or_default, write_json_atomic};

/// User settings for Tally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Whether budgets and the budget note are scoped per month or per day
    #[serde(default)]
    pub granularity: ReportingGranularity,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Merge mode used by `import` when none is given
    #[serde(default)]
    pub default_import_mode: MergeMode,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "£".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            granularity: ReportingGranularity::default(),
            currency_symbol: default_currency(),
            default_import_mode: MergeMode::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file is missing
    ///
    /// An unreadable file is logged and replaced by the defaults in memory;
    /// nothing is written until the caller saves.
    pub fn load_or_create(paths: &TallyPaths) -> Self {
        read_json_or_default(paths.settings_file())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &TallyPaths) -> Result<(), TallyError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)?;

        tracing::debug!(path = %paths.settings_file().display(), "settings saved");
        Ok(())
    }
}
