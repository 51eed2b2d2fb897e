//! CSV directory dataset adapter.

use crate::domain::error::FactsError;
use crate::domain::table::RawTable;
use crate::ports::dataset_port::DatasetPort;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads every `*.csv` file (extension matched case-insensitively) in one directory.
pub struct CsvDirectoryAdapter {
    base_path: PathBuf,
}

impl CsvDirectoryAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn is_csv(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
    }
}

impl DatasetPort for CsvDirectoryAdapter {
    fn list_sources(&self) -> Result<Vec<String>, FactsError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| FactsError::DataDirectory {
            path: self.base_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FactsError::DataDirectory {
                path: self.base_path.display().to_string(),
                reason: format!("directory entry error: {}", e),
            })?;
            let path = entry.path();
            if path.is_file() && Self::is_csv(&path) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_source(&self, name: &str) -> Result<RawTable, FactsError> {
        let path = self.base_path.join(name);
        let load_err = |reason: String| FactsError::Load {
            file: name.to_string(),
            reason,
        };

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| load_err(e.to_string()))?;

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| load_err(format!("CSV header error: {}", e)))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| load_err(format!("CSV parse error: {}", e)))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(RawTable {
            source: name.to_string(),
            headers,
            rows,
        })
    }
}
