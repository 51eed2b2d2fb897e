//! Dataset normalization: raw string records into typed tables.
//!
//! Per-column rules, applied in order:
//! 1. Columns whose lowercased name contains a numeric keyword are coerced to
//!    numbers. The `NULL` sentinel, blanks and unparsable values become 0.
//! 2. Columns whose non-empty values all parse as numbers stay numeric.
//! 3. Everything else is text, trimmed and lowercased.

use super::table::{Cell, RawTable, Table};

/// Substrings marking a column as numeric (quantity, P&L, market value, price, principal).
pub const NUMERIC_KEYWORDS: [&str; 5] = ["qty", "pl_", "mv_", "price", "principal"];

pub const NULL_SENTINEL: &str = "null";

pub fn is_numeric_keyword_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    NUMERIC_KEYWORDS.iter().any(|k| lower.contains(k))
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce a value from a numeric-keyword column. Never fails.
pub fn coerce_numeric(value: &str) -> f64 {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case(NULL_SENTINEL) {
        return 0.0;
    }
    parse_number(trimmed).unwrap_or(0.0)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Coerced,
    Numeric,
    Text,
}

fn classify(name: &str, values: &[&str]) -> ColumnKind {
    if is_numeric_keyword_column(name) {
        return ColumnKind::Coerced;
    }
    let mut non_empty = values.iter().filter(|v| !v.trim().is_empty()).peekable();
    if non_empty.peek().is_some() && non_empty.all(|v| parse_number(v).is_some()) {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn normalize_cell(kind: ColumnKind, value: &str) -> Cell {
    let trimmed = value.trim();
    match kind {
        ColumnKind::Coerced => Cell::Number(coerce_numeric(trimmed)),
        _ if trimmed.is_empty() => Cell::Empty,
        ColumnKind::Numeric => parse_number(trimmed).map(Cell::Number).unwrap_or(Cell::Empty),
        ColumnKind::Text => Cell::Text(trimmed.to_lowercase()),
    }
}

/// Normalize one raw table. Returns `None` when the result has no rows or no columns.
///
/// Short rows are padded with empty cells and surplus fields are dropped, so
/// every row of the result has one cell per column.
pub fn normalize(raw: RawTable) -> Option<Table> {
    let columns: Vec<String> = raw.headers.iter().map(|h| h.trim().to_string()).collect();
    if columns.is_empty() || raw.rows.is_empty() {
        return None;
    }

    let kinds: Vec<ColumnKind> = columns
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values: Vec<&str> = raw
                .rows
                .iter()
                .map(|r| r.get(idx).map(String::as_str).unwrap_or(""))
                .collect();
            classify(name, &values)
        })
        .collect();

    let rows: Vec<Vec<Cell>> = raw
        .rows
        .iter()
        .map(|record| {
            kinds
                .iter()
                .enumerate()
                .map(|(idx, kind)| {
                    let value = record.get(idx).map(String::as_str).unwrap_or("");
                    normalize_cell(*kind, value)
                })
                .collect()
        })
        .collect();

    Some(Table {
        source: raw.source,
        columns,
        rows,
    })
}
