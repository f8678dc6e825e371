//! Application configuration for fintrack
//!
//! Holds presentation and behaviour preferences that are not part of the
//! finance data itself. Budget and currency live in the preferences store.

use serde::{Deserialize, Serialize};

use super::paths::FinancePaths;
use crate::error::FinanceError;

/// Current `config.json` schema version
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Application configuration, persisted as `config.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format used when printing transactions (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether store mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,

    /// Default number of rows shown by `txn list`
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
}

fn default_schema_version() -> u32 {
    CONFIG_SCHEMA_VERSION
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_audit_enabled() -> bool {
    true
}

fn default_list_limit() -> usize {
    50
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            audit_enabled: default_audit_enabled(),
            list_limit: default_list_limit(),
        }
    }
}

impl Config {
    /// Load `config.json`, writing the defaults on first run
    ///
    /// Files from an older schema are filled with defaults and rewritten at
    /// the current version. A newer schema is refused so its settings are
    /// not silently dropped.
    pub fn load_or_create(paths: &FinancePaths) -> Result<Self, FinanceError> {
        let config_path = paths.config_file();

        if !config_path.exists() {
            let config = Config::default();
            config.save(paths)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read config file: {}", e)))?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| FinanceError::Config(format!("Failed to parse config file: {}", e)))?;

        if config.schema_version > CONFIG_SCHEMA_VERSION {
            return Err(FinanceError::Config(format!(
                "{} has schema version {}, this build supports up to {}",
                config_path.display(),
                config.schema_version,
                CONFIG_SCHEMA_VERSION
            )));
        }
        if config.schema_version < CONFIG_SCHEMA_VERSION {
            config.schema_version = CONFIG_SCHEMA_VERSION;
            config.save(paths)?;
        }

        Ok(config)
    }

    /// Save config to disk
    pub fn save(&self, paths: &FinancePaths) -> Result<(), FinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FinanceError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(paths.config_file(), contents)
            .map_err(|e| FinanceError::Io(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}
