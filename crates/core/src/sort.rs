//! Stable sort of a dataset by one text column
//!
//! Keys compare by code point (byte-wise UTF-8), so uppercase sorts before
//! lowercase. Missing keys always go last. Records with equal keys keep
//! their input order.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tabclean_formats::{Cell, Dataset, Record};
use tracing::debug;

/// Column sorted on by default
pub const DEFAULT_SORT_COLUMN: &str = "title";

/// Sort configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SortConfig {
    /// Column whose text is the sort key; the first column with this name wins
    pub column: String,
    /// Sort Z-A instead of A-Z
    pub descending: bool,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_SORT_COLUMN.to_string(),
            descending: false,
        }
    }
}

impl SortConfig {
    pub fn by_column(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            ..Default::default()
        }
    }
}

fn sort_key(record: &Record, index: usize) -> Option<&str> {
    record.get(index).and_then(Cell::text)
}

fn compare_keys(a: Option<&str>, b: Option<&str>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.cmp(b);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reorder records by the configured column. Only row order changes.
pub fn sort_dataset(dataset: Dataset, config: &SortConfig) -> Result<Dataset> {
    let index = dataset
        .column_index(&config.column)
        .ok_or_else(|| Error::MissingColumn {
            column: config.column.clone(),
            available: dataset.headers().to_vec(),
        })?;

    debug!(
        "Sorting {} records by column {} ({:?}), descending: {}",
        dataset.len(),
        index,
        config.column,
        config.descending
    );

    let headers = dataset.headers().to_vec();
    let mut records = dataset.into_records();
    // slice::sort_by is stable
    records.sort_by(|a, b| compare_keys(sort_key(a, index), sort_key(b, index), config.descending));

    Ok(Dataset::new(headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabclean_formats::NaValues;

    fn dataset(headers: &[&str], rows: &[&[&str]]) -> Dataset {
        let na = NaValues::default();
        Dataset::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .enumerate()
                .map(|(i, r)| Record::from_raw(r.iter().copied(), &na, i as u64 + 2))
                .collect(),
        )
    }

    fn column(ds: &Dataset, index: usize) -> Vec<&str> {
        ds.records().iter().map(|r| r.cells[index].raw()).collect()
    }

    #[test]
    fn test_code_point_order() {
        let ds = dataset(&["title"], &[&["Banana"], &["Apple"], &["apple"]]);
        let sorted = sort_dataset(ds, &SortConfig::default()).unwrap();
        assert_eq!(column(&sorted, 0), vec!["Apple", "Banana", "apple"]);
    }

    #[test]
    fn test_stable_for_equal_titles() {
        let ds = dataset(
            &["title", "id"],
            &[&["B", "1"], &["A", "2"], &["B", "3"], &["A", "4"]],
        );
        let sorted = sort_dataset(ds, &SortConfig::default()).unwrap();
        assert_eq!(column(&sorted, 1), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_missing_titles_last() {
        let ds = dataset(
            &["title", "id"],
            &[&["", "1"], &["B", "2"], &["NaN", "3"], &["A", "4"]],
        );
        let sorted = sort_dataset(ds, &SortConfig::default()).unwrap();
        assert_eq!(column(&sorted, 1), vec!["4", "2", "1", "3"]);
    }

    #[test]
    fn test_descending_keeps_missing_last() {
        let ds = dataset(&["title"], &[&["A"], &[""], &["C"], &["B"]]);
        let config = SortConfig {
            descending: true,
            ..Default::default()
        };
        let sorted = sort_dataset(ds, &config).unwrap();
        assert_eq!(column(&sorted, 0), vec!["C", "B", "A", ""]);
    }

    #[test]
    fn test_numbers_sort_as_text() {
        let ds = dataset(&["title"], &[&["10"], &["9"], &["100"]]);
        let sorted = sort_dataset(ds, &SortConfig::default()).unwrap();
        assert_eq!(column(&sorted, 0), vec!["10", "100", "9"]);
    }

    #[test]
    fn test_first_title_column_is_key() {
        let ds = dataset(&["title", "title"], &[&["B", "a"], &["A", "b"]]);
        let sorted = sort_dataset(ds, &SortConfig::default()).unwrap();
        assert_eq!(column(&sorted, 0), vec!["A", "B"]);
        assert_eq!(column(&sorted, 1), vec!["b", "a"]);
    }

    #[test]
    fn test_missing_column() {
        let ds = dataset(&["name"], &[&["x"]]);
        let err = sort_dataset(ds, &SortConfig::default()).unwrap_err();
        match err {
            Error::MissingColumn { column, available } => {
                assert_eq!(column, "title");
                assert_eq!(available, vec!["name".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_custom_column() {
        let ds = dataset(&["title", "brand"], &[&["x", "Zeta"], &["y", "Alpha"]]);
        let sorted = sort_dataset(ds, &SortConfig::by_column("brand")).unwrap();
        assert_eq!(column(&sorted, 0), vec!["y", "x"]);
    }
}
