//! Normalized in-memory tables.

use std::fmt;

/// A single normalized cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Numeric view of the cell. Text and empty cells count as zero.
    pub fn as_f64(&self) -> f64 {
        match self {
            Cell::Number(v) => *v,
            Cell::Text(_) | Cell::Empty => 0.0,
        }
    }

    /// Stringified grouping key. `None` for empty cells.
    pub fn key(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => write!(f, "{v:.1}"),
            Cell::Number(v) => write!(f, "{v}"),
            Cell::Empty => Ok(()),
        }
    }
}

/// A source file as read from disk, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub source: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// One normalized dataset. Every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub source: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column whose lowercased name equals one of `aliases`.
    ///
    /// Columns are scanned in table order, so when several aliases are present
    /// the leftmost column wins regardless of alias order.
    pub fn find_column(&self, aliases: &[&str]) -> Option<usize> {
        self.columns.iter().position(|c| {
            let lower = c.to_lowercase();
            aliases.iter().any(|a| *a == lower)
        })
    }

    /// Pad short rows with empty cells and drop surplus cells, so every row
    /// has exactly one cell per column.
    pub fn conform_rows(&mut self) {
        let width = self.columns.len();
        for row in &mut self.rows {
            row.resize(width, Cell::Empty);
        }
    }

    /// Iterator over the cells of one column.
    pub fn column_cells(&self, idx: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().filter_map(move |row| row.get(idx))
    }
}
