//! `[data]` / `[engine]` settings read from an INI file.

use crate::domain::error::FactsError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::fs;
use std::path::Path;

/// Label used in diagnostics for settings not read from a file.
const INLINE_ORIGIN: &str = "<inline>";

pub struct FileConfigAdapter {
    ini: Ini,
    origin: String,
}

impl FileConfigAdapter {
    /// Read and parse a settings file. Unreadable or malformed files are a
    /// `ConfigParse` error naming the file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FactsError> {
        let origin = path.as_ref().display().to_string();
        let text = fs::read_to_string(path.as_ref()).map_err(|e| FactsError::ConfigParse {
            file: origin.clone(),
            reason: e.to_string(),
        })?;
        Self::parse(&text, origin)
    }

    pub fn from_string(text: &str) -> Result<Self, FactsError> {
        Self::parse(text, INLINE_ORIGIN.to_string())
    }

    fn parse(text: &str, origin: String) -> Result<Self, FactsError> {
        let mut ini = Ini::new();
        match ini.read(text.to_string()) {
            Ok(_) => Ok(Self { ini, origin }),
            Err(reason) => Err(FactsError::ConfigParse {
                file: origin,
                reason,
            }),
        }
    }

    /// Where these settings came from: a file path or `<inline>`.
    pub fn origin(&self) -> &str {
        &self.origin
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.ini.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        match self.ini.getint(section, key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(reason) => {
                tracing::warn!(
                    origin = %self.origin,
                    "[{section}] {key} is not an integer ({reason}), using {default}"
                );
                default
            }
        }
    }
}
