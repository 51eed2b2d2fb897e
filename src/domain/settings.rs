//! Engine settings read from configuration.

use crate::domain::error::FactsError;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_SCHEMA_ROWS: usize = 3;
pub const DEFAULT_DATA_DIR: &str = "data";
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Entities that always get an existence fact, even with zero matching rows.
pub const DEFAULT_ALWAYS_REPORT: [&str; 3] = ["ytum", "garfield", "heather"];

#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub schema_rows: usize,
    pub always_report: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            schema_rows: DEFAULT_SCHEMA_ROWS,
            always_report: DEFAULT_ALWAYS_REPORT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl EngineSettings {
    /// Build settings from the `[engine]` section, falling back to defaults.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, FactsError> {
        let rows = config.get_int("engine", "schema_rows", DEFAULT_SCHEMA_ROWS as i64);
        if rows < 0 {
            return Err(FactsError::ConfigInvalid {
                section: "engine".to_string(),
                key: "schema_rows".to_string(),
                reason: "schema_rows must be non-negative".to_string(),
            });
        }

        let always_report = match config.get_string("engine", "always_report") {
            Some(list) => parse_name_list(&list),
            None => EngineSettings::default().always_report,
        };

        Ok(EngineSettings {
            schema_rows: rows as usize,
            always_report,
        })
    }
}

/// Comma-separated names, trimmed and lowercased; blanks are dropped.
pub fn parse_name_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Data directory: explicit override, then `[data] dir`, then `$DATA_DIR`, then `data`.
pub fn resolve_data_dir(
    override_dir: Option<&PathBuf>,
    config: Option<&dyn ConfigPort>,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.clone();
    }
    if let Some(dir) = config.and_then(|c| c.get_string("data", "dir")) {
        return PathBuf::from(dir);
    }
    std::env::var(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR))
}
