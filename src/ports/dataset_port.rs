//! Dataset source port trait.

use crate::domain::error::FactsError;
use crate::domain::table::RawTable;

/// A source of raw tabular datasets, keyed by source name.
pub trait DatasetPort {
    /// Names of every available dataset, in a stable order.
    fn list_sources(&self) -> Result<Vec<String>, FactsError>;

    /// Read one dataset by name. Failures are per source and recoverable.
    fn read_source(&self, name: &str) -> Result<RawTable, FactsError>;
}
