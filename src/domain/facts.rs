//! Deterministic fact computation over the dataset registry.
//!
//! Three rules contribute facts, always in this order:
//! - performance: per-fund `PL_YTD` totals ranked best to worst,
//! - record counts: per-fund row counts,
//! - entity: existence, P&L and quantity totals for each resolved entity.
//!
//! Grouping and matching use the normalized lowercase values; names are only
//! capitalized when rendered.

use super::registry::Registry;
use super::table::Table;
use super::vocabulary::{entity_lookup_column, identity_column};
use std::collections::{BTreeSet, HashMap, HashSet};

pub const FALLBACK_FACT: &str =
    "No specific numerical facts computed for the given entities/metrics.";

pub const PL_COLUMN: &str = "pl_ytd";
pub const QTY_COLUMN: &str = "qty";

/// Ordered, duplicate-free list of fact statements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FactSheet {
    facts: Vec<String>,
    seen: HashSet<String>,
}

impl FactSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fact unless an identical one is already present.
    pub fn push(&mut self, fact: String) {
        if self.seen.insert(fact.clone()) {
            self.facts.push(fact);
        }
    }

    pub fn facts(&self) -> &[String] {
        &self.facts
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Newline-joined facts, or [`FALLBACK_FACT`] when there are none.
    pub fn render(&self) -> String {
        if self.facts.is_empty() {
            FALLBACK_FACT.to_string()
        } else {
            self.facts.join("\n")
        }
    }
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Groups in first-seen order, each with its accumulated value.
fn group_by<F>(table: &Table, group_idx: usize, mut value: F) -> Vec<(String, f64)>
where
    F: FnMut(usize) -> f64,
{
    let mut order: Vec<(String, f64)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row_idx, row) in table.rows.iter().enumerate() {
        let Some(key) = row.get(group_idx).and_then(|c| c.key()) else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push((key, 0.0));
            order.len() - 1
        });
        order[slot].1 += value(row_idx);
    }

    order
}

/// Stable descending sort; equal values keep first-seen order.
fn rank(groups: &mut [(String, f64)]) {
    groups.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
}

fn column_sum(table: &Table, col: usize, rows: &[usize]) -> f64 {
    rows.iter().map(|&r| table.rows[r][col].as_f64()).sum()
}

pub fn performance_facts(registry: &Registry, sheet: &mut FactSheet) {
    for table in registry.tables() {
        let pl = table.find_column(&[PL_COLUMN]);
        let (Some(pl), Some(group)) = (pl, identity_column(table)) else {
            continue;
        };

        let mut totals = group_by(table, group, |r| table.rows[r][pl].as_f64());
        if totals.is_empty() {
            continue;
        }
        rank(&mut totals);

        let ranked: Vec<String> = totals.iter().map(|(name, _)| capitalize(name)).collect();
        sheet.push(format!(
            "Fact: In {}, funds ranked by performance (Best to Worst): {}",
            table.source,
            ranked.join(", ")
        ));
        for (name, total) in &totals {
            sheet.push(format!(
                "Fact: Fund {} in {} has total PL_YTD of {:.4}",
                capitalize(name),
                table.source,
                total
            ));
        }
    }
}

pub fn record_count_facts(registry: &Registry, sheet: &mut FactSheet) {
    for table in registry.tables() {
        let Some(group) = identity_column(table) else {
            continue;
        };

        let mut counts = group_by(table, group, |_| 1.0);
        if counts.is_empty() {
            continue;
        }
        rank(&mut counts);

        let (top, top_count) = &counts[0];
        sheet.push(format!(
            "Fact: In {}, portfolio '{}' has the absolute highest number of records ({}).",
            table.source,
            capitalize(top),
            *top_count as usize
        ));
        let details: Vec<String> = counts
            .iter()
            .map(|(name, n)| format!("{}: {} records", capitalize(name), *n as usize))
            .collect();
        sheet.push(format!(
            "Fact: Summary of record counts in {}: {}.",
            table.source,
            details.join(", ")
        ));
    }
}

/// Existence, P&L and quantity facts for each resolved entity in each table.
///
/// Entities in `always_report` get an existence fact even when nothing matches.
pub fn entity_facts(
    registry: &Registry,
    entities: &BTreeSet<String>,
    always_report: &[String],
    sheet: &mut FactSheet,
) {
    for entity in entities {
        let needle = entity.to_lowercase();
        let display = capitalize(entity);

        for table in registry.tables() {
            let Some(group) = entity_lookup_column(table) else {
                continue;
            };

            let matched: Vec<usize> = table
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| {
                    row[group]
                        .key()
                        .is_some_and(|v| v.to_lowercase().contains(&needle))
                })
                .map(|(idx, _)| idx)
                .collect();

            if matched.is_empty() && !always_report.iter().any(|a| *a == needle) {
                continue;
            }
            sheet.push(format!(
                "Fact: {} has {} records in {}.",
                display,
                matched.len(),
                table.source
            ));
            if matched.is_empty() {
                continue;
            }

            if let Some(pl) = table.find_column(&[PL_COLUMN]) {
                sheet.push(format!(
                    "Fact: {} has a total PL_YTD of {:.4} in {}.",
                    display,
                    column_sum(table, pl, &matched),
                    table.source
                ));
            }
            if let Some(qty) = table.find_column(&[QTY_COLUMN]) {
                sheet.push(format!(
                    "Fact: {} has a total Quantity of {:.4} in {}.",
                    display,
                    column_sum(table, qty, &matched),
                    table.source
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn trades() -> Registry {
        Registry::from_tables(vec![Table {
            source: "trades.csv".into(),
            columns: vec!["PortfolioName".into(), "PL_YTD".into(), "Qty".into()],
            rows: vec![
                vec![text("ytum"), Cell::Number(10.5), Cell::Number(100.0)],
                vec![text("ytum"), Cell::Number(-2.0), Cell::Number(50.0)],
                vec![text("garfield"), Cell::Number(3.25), Cell::Number(7.0)],
            ],
        }])
    }

    #[test]
    fn capitalize_lowercases_the_tail() {
        assert_eq!(capitalize("ytum"), "Ytum");
        assert_eq!(capitalize("ALPHA FUND"), "Alpha fund");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn sheet_deduplicates_keeping_first() {
        let mut sheet = FactSheet::new();
        sheet.push("a".into());
        sheet.push("b".into());
        sheet.push("a".into());
        assert_eq!(sheet.facts(), &["a".to_string(), "b".to_string()]);
        assert_eq!(sheet.render(), "a\nb");
    }

    #[test]
    fn empty_sheet_renders_fallback() {
        assert_eq!(FactSheet::new().render(), FALLBACK_FACT);
    }

    #[test]
    fn performance_ranks_by_summed_pl() {
        let mut sheet = FactSheet::new();
        performance_facts(&trades(), &mut sheet);
        assert_eq!(
            sheet.facts(),
            &[
                "Fact: In trades.csv, funds ranked by performance (Best to Worst): Ytum, Garfield"
                    .to_string(),
                "Fact: Fund Ytum in trades.csv has total PL_YTD of 8.5000".to_string(),
                "Fact: Fund Garfield in trades.csv has total PL_YTD of 3.2500".to_string(),
            ]
        );
    }

    #[test]
    fn ranking_ties_keep_first_seen_order() {
        let reg = Registry::from_tables(vec![Table {
            source: "t.csv".into(),
            columns: vec!["name".into(), "pl_ytd".into()],
            rows: vec![
                vec![text("zeta"), Cell::Number(1.0)],
                vec![text("alpha"), Cell::Number(1.0)],
                vec![text("mid"), Cell::Number(2.0)],
            ],
        }]);
        let mut sheet = FactSheet::new();
        performance_facts(&reg, &mut sheet);
        assert!(sheet.facts()[0].ends_with("Mid, Zeta, Alpha"));
    }

    #[test]
    fn performance_requires_identity_and_pl_columns() {
        let reg = Registry::from_tables(vec![Table {
            source: "t.csv".into(),
            columns: vec!["StrategyName".into(), "pl_ytd".into()],
            rows: vec![vec![text("carry"), Cell::Number(1.0)]],
        }]);
        let mut sheet = FactSheet::new();
        performance_facts(&reg, &mut sheet);
        assert!(sheet.is_empty());
    }

    #[test]
    fn ragged_rows_do_not_break_any_rule() {
        let reg = Registry::from_tables(vec![Table {
            source: "trades.csv".into(),
            columns: vec!["name".into(), "pl_ytd".into(), "qty".into()],
            rows: vec![vec![text("ytum")], vec![text("ytum"), Cell::Number(2.5)]],
        }]);
        let mut sheet = FactSheet::new();
        performance_facts(&reg, &mut sheet);
        record_count_facts(&reg, &mut sheet);
        let entities: BTreeSet<String> = ["ytum".to_string()].into();
        entity_facts(&reg, &entities, &[], &mut sheet);

        assert!(sheet
            .facts()
            .contains(&"Fact: Fund Ytum in trades.csv has total PL_YTD of 2.5000".to_string()));
        assert!(sheet
            .facts()
            .contains(&"Fact: Ytum has a total Quantity of 0.0000 in trades.csv.".to_string()));
    }

    #[test]
    fn record_counts_name_the_top_group() {
        let mut sheet = FactSheet::new();
        record_count_facts(&trades(), &mut sheet);
        assert_eq!(
            sheet.facts(),
            &[
                concat!(
                    "Fact: In trades.csv, portfolio 'Ytum' has the absolute highest ",
                    "number of records (2)."
                )
                .to_string(),
                concat!(
                    "Fact: Summary of record counts in trades.csv: ",
                    "Ytum: 2 records, Garfield: 1 records."
                )
                .to_string(),
            ]
        );
    }

    #[test]
    fn entity_facts_sum_matched_rows() {
        let mut sheet = FactSheet::new();
        let entities: BTreeSet<String> = ["ytum".to_string()].into();
        entity_facts(&trades(), &entities, &[], &mut sheet);
        assert_eq!(
            sheet.facts(),
            &[
                "Fact: Ytum has 2 records in trades.csv.".to_string(),
                "Fact: Ytum has a total PL_YTD of 8.5000 in trades.csv.".to_string(),
                "Fact: Ytum has a total Quantity of 150.0000 in trades.csv.".to_string(),
            ]
        );
    }

    #[test]
    fn entity_matching_is_substring() {
        let reg = Registry::from_tables(vec![Table {
            source: "s.csv".into(),
            columns: vec!["StrategyName".into()],
            rows: vec![vec![text("ytum growth")], vec![text("ytum income")], vec![text("other")]],
        }]);
        let mut sheet = FactSheet::new();
        let entities: BTreeSet<String> = ["ytum".to_string()].into();
        entity_facts(&reg, &entities, &[], &mut sheet);
        assert_eq!(sheet.facts(), &["Fact: Ytum has 2 records in s.csv.".to_string()]);
    }

    #[test]
    fn always_report_entities_get_zero_count_facts() {
        let mut sheet = FactSheet::new();
        let entities: BTreeSet<String> = ["heather".to_string(), "nobody".to_string()].into();
        entity_facts(&trades(), &entities, &["heather".to_string()], &mut sheet);
        assert_eq!(sheet.facts(), &["Fact: Heather has 0 records in trades.csv.".to_string()]);
    }
}
