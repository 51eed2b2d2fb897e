//! Dataset registry: the immutable set of normalized tables.

use super::error::FactsError;
use super::normalize::normalize;
use super::table::{Cell, Table};
use crate::ports::dataset_port::DatasetPort;
use std::collections::BTreeMap;

/// Normalized tables keyed by source name, held in ascending name order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Registry {
    tables: BTreeMap<String, Table>,
}

impl Registry {
    /// Build a registry from already normalized tables. Empty tables are
    /// dropped and ragged rows are conformed to the column count.
    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Self {
        Registry {
            tables: tables
                .into_iter()
                .filter(|t| t.row_count() > 0 && t.column_count() > 0)
                .map(|mut t| {
                    t.conform_rows();
                    (t.source.clone(), t)
                })
                .collect(),
        }
    }

    /// Load and normalize every source of `port`.
    ///
    /// Only a failure to list the sources is returned; a source that fails to
    /// read is logged and skipped, and a source that normalizes to nothing is
    /// dropped.
    pub fn load(port: &dyn DatasetPort) -> Result<Self, FactsError> {
        let mut tables = BTreeMap::new();

        for name in port.list_sources()? {
            let raw = match port.read_source(&name) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!(source = %name, error = %e, "skipping dataset");
                    continue;
                }
            };
            match normalize(raw) {
                Some(table) => {
                    tracing::debug!(
                        source = %name,
                        rows = table.row_count(),
                        columns = table.column_count(),
                        "loaded dataset"
                    );
                    tables.insert(name, table);
                }
                None => tracing::info!(source = %name, "dataset is empty, skipping"),
            }
        }

        tracing::info!(tables = tables.len(), "dataset registry ready");
        Ok(Registry { tables })
    }

    /// True when at least one table was loaded.
    pub fn loaded(&self) -> bool {
        !self.tables.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.loaded()
            && self
                .tables
                .values()
                .all(|t| t.row_count() > 0 && t.column_count() > 0)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn get(&self, source: &str) -> Option<&Table> {
        self.tables.get(source)
    }

    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Render name, columns and up to `row_limit` leading rows of every table.
    pub fn schema_sample(&self, row_limit: usize) -> String {
        let mut out = Vec::new();
        for table in self.tables.values() {
            out.push(format!("### Dataset: {}", table.source));
            out.push(format!("Columns: {}", table.columns.join(", ")));
            out.push(render_grid(table, row_limit));
            out.push(String::new());
        }
        out.join("\n")
    }
}

/// Right-aligned text grid of the header and the first `row_limit` rows.
fn render_grid(table: &Table, row_limit: usize) -> String {
    let body: Vec<Vec<String>> = table
        .rows
        .iter()
        .take(row_limit)
        .map(|row| row.iter().map(Cell::to_string).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            body.iter()
                .map(|r| r[idx].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join(" ")
    };

    std::iter::once(line(table.columns.as_slice()))
        .chain(body.iter().map(|r| line(r.as_slice())))
        .collect::<Vec<_>>()
        .join("\n")
}
