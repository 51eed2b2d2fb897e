#![allow(dead_code)]

use fundfacts::domain::error::FactsError;
use fundfacts::domain::table::RawTable;
use fundfacts::ports::dataset_port::DatasetPort;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// In-memory dataset source. Sources registered with an error fail to read.
pub struct MockDatasetPort {
    pub sources: BTreeMap<String, RawTable>,
    pub errors: BTreeMap<String, String>,
    pub list_error: Option<String>,
}

impl MockDatasetPort {
    pub fn new() -> Self {
        Self {
            sources: BTreeMap::new(),
            errors: BTreeMap::new(),
            list_error: None,
        }
    }

    pub fn with_csv(mut self, name: &str, content: &str) -> Self {
        self.sources.insert(name.to_string(), parse_csv(name, content));
        self
    }

    pub fn with_error(mut self, name: &str, reason: &str) -> Self {
        self.errors.insert(name.to_string(), reason.to_string());
        self
    }

    pub fn unlistable(mut self, reason: &str) -> Self {
        self.list_error = Some(reason.to_string());
        self
    }
}

impl DatasetPort for MockDatasetPort {
    fn list_sources(&self) -> Result<Vec<String>, FactsError> {
        if let Some(reason) = &self.list_error {
            return Err(FactsError::DataDirectory {
                path: "mock".into(),
                reason: reason.clone(),
            });
        }
        let mut names: Vec<String> = self
            .sources
            .keys()
            .chain(self.errors.keys())
            .cloned()
            .collect();
        names.sort();
        Ok(names)
    }

    fn read_source(&self, name: &str) -> Result<RawTable, FactsError> {
        if let Some(reason) = self.errors.get(name) {
            return Err(FactsError::Load {
                file: name.to_string(),
                reason: reason.clone(),
            });
        }
        self.sources.get(name).cloned().ok_or_else(|| FactsError::Load {
            file: name.to_string(),
            reason: "not found".into(),
        })
    }
}

/// Naive comma split; fixtures never quote.
pub fn parse_csv(name: &str, content: &str) -> RawTable {
    let mut lines = content.lines().filter(|l| !l.trim().is_empty());
    let headers: Vec<String> = lines
        .next()
        .map(|h| h.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<String>> = lines
        .map(|l| l.split(',').map(str::to_string).collect())
        .collect();
    RawTable {
        source: name.to_string(),
        headers,
        rows,
    }
}

pub const TRADES_CSV: &str = "PortfolioName,PL_YTD\nYtum,10.5\nytum ,-2.0\nGarfield,3.25\n";

pub const HOLDINGS_CSV: &str = "\
ShortName,SecurityName,Qty,MV_Base,Price
Ytum,Bond A,100,1000.5,10
Heather,Bond B,NULL,200,n/a
Ytum,Equity C,50,abc,12.5
Heather,Equity D,25,300,4
Heather,Equity E,5,,1
";

pub const STRATEGIES_CSV: &str = "\
StrategyName,PL_YTD
Ytum Growth,4.0
Ytum Income,1.5
Carry,2.0
";

pub fn write_fixture_dir(dir: &Path) {
    fs::write(dir.join("trades.csv"), TRADES_CSV).unwrap();
    fs::write(dir.join("holdings.CSV"), HOLDINGS_CSV).unwrap();
    fs::write(dir.join("strategies.csv"), STRATEGIES_CSV).unwrap();
    fs::write(dir.join("empty.csv"), "PortfolioName,PL_YTD\n").unwrap();
    fs::write(dir.join("readme.txt"), "ignored").unwrap();
}

pub fn fixture_port() -> MockDatasetPort {
    MockDatasetPort::new()
        .with_csv("trades.csv", TRADES_CSV)
        .with_csv("holdings.csv", HOLDINGS_CSV)
        .with_csv("strategies.csv", STRATEGIES_CSV)
}
