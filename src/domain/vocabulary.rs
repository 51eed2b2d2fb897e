//! Identity column aliases and the known-entity vocabulary.

use super::registry::Registry;
use super::table::Table;
use std::collections::BTreeSet;

/// Column names that identify a fund or portfolio.
pub const IDENTITY_ALIASES: [&str; 4] = ["portfolioname", "portfolio_name", "shortname", "name"];

/// Aliases used when looking up rows for a single entity. Unlike
/// [`IDENTITY_ALIASES`] this also accepts strategy names, so strategy values
/// can be matched but never become known entities themselves.
pub const ENTITY_LOOKUP_ALIASES: [&str; 5] = [
    "portfolioname",
    "portfolio_name",
    "shortname",
    "name",
    "strategyname",
];

pub fn identity_column(table: &Table) -> Option<usize> {
    table.find_column(&IDENTITY_ALIASES)
}

pub fn entity_lookup_column(table: &Table) -> Option<usize> {
    table.find_column(&ENTITY_LOOKUP_ALIASES)
}

/// Union of the distinct identity values of every table.
pub fn known_entities(registry: &Registry) -> BTreeSet<String> {
    registry
        .tables()
        .filter_map(|t| identity_column(t).map(|idx| (t, idx)))
        .flat_map(|(t, idx)| t.column_cells(idx).filter_map(|c| c.key()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::Cell;

    fn table(source: &str, columns: &[&str], values: &[&[&str]]) -> Table {
        Table {
            source: source.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: values
                .iter()
                .map(|r| r.iter().map(|v| Cell::Text(v.to_string())).collect())
                .collect(),
        }
    }

    #[test]
    fn unions_identity_values_across_tables() {
        let reg = Registry::from_tables(vec![
            table("a.csv", &["PortfolioName"], &[&["ytum"], &["garfield"], &["ytum"]]),
            table("b.csv", &["ShortName"], &[&["heather"]]),
        ]);
        let known = known_entities(&reg);
        let expected: Vec<&str> = vec!["garfield", "heather", "ytum"];
        assert_eq!(known.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn strategy_names_are_not_known_entities() {
        let reg = Registry::from_tables(vec![table("s.csv", &["StrategyName"], &[&["momentum"]])]);
        assert!(known_entities(&reg).is_empty());
        let t = reg.get("s.csv").unwrap();
        assert_eq!(identity_column(t), None);
        assert_eq!(entity_lookup_column(t), Some(0));
    }

    #[test]
    fn first_matching_column_wins() {
        let t = table("a.csv", &["Name", "PortfolioName"], &[&["x", "y"]]);
        assert_eq!(identity_column(&t), Some(0));
        let reg = Registry::from_tables(vec![t]);
        assert!(known_entities(&reg).contains("x"));
        assert!(!known_entities(&reg).contains("y"));
    }

    #[test]
    fn empty_cells_contribute_nothing() {
        let t = Table {
            source: "a.csv".into(),
            columns: vec!["name".into()],
            rows: vec![vec![Cell::Empty], vec![Cell::Text("alpha".into())]],
        };
        let known = known_entities(&Registry::from_tables(vec![t]));
        assert_eq!(known.len(), 1);
    }
}
