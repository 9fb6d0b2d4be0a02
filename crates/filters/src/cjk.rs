//! CJK (Chinese/Han) text detection and filtering
//!
//! A record is dropped when any checked cell contains a character from the
//! CJK Unified Ideographs blocks. Missing cells never match.

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tabclean_formats::{Cell, Dataset, Record};
use tracing::debug;

/// Inclusive code point ranges treated as Chinese text
pub const CJK_RANGES: &[(u32, u32)] = &[
    (0x4E00, 0x9FFF),   // CJK Unified Ideographs
    (0x3400, 0x4DBF),   // Extension A
    (0x20000, 0x2A6DF), // Extension B
    (0x2A700, 0x2B73F), // Extension C
    (0x2B740, 0x2B81F), // Extension D
    (0x2B820, 0x2CEAF), // Extension E
];

// Character class built from CJK_RANGES on first use
static CJK_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cjk_regex() -> &'static Regex {
    CJK_REGEX.get_or_init(|| {
        let class: String = CJK_RANGES
            .iter()
            .map(|(lo, hi)| format!("\\x{{{:X}}}-\\x{{{:X}}}", lo, hi))
            .collect();
        Regex::new(&format!("[{}]", class)).expect("Failed to compile CJK regex")
    })
}

/// Check a single character against the CJK ranges
pub fn is_cjk_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    get_cjk_regex().is_match(c.encode_utf8(&mut buf))
}

/// Check if the text contains Chinese characters
pub fn contains_chinese_text(text: &str) -> bool {
    get_cjk_regex().is_match(text)
}

/// Check a cell. Missing cells are never Chinese; any other cell is checked
/// on its textual representation.
pub fn contains_chinese(cell: &Cell) -> bool {
    cell.text().is_some_and(contains_chinese_text)
}

/// True iff at least one cell of the record contains Chinese characters
pub fn record_contains_chinese(record: &Record) -> bool {
    record.iter().any(contains_chinese)
}

/// CJK filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChineseFilterConfig {
    /// Columns to check (None = every column)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl ChineseFilterConfig {
    /// Check every column
    pub fn all_columns() -> Self {
        Self { columns: None }
    }

    /// Check only the named columns
    pub fn only(columns: Vec<String>) -> Self {
        Self {
            columns: Some(columns),
        }
    }
}

/// Record filter dropping rows with Chinese text, bound to one header
pub struct ChineseFilter {
    headers: Vec<String>,
    /// Column positions to check, None = all
    checked: Option<Vec<usize>>,
}

impl ChineseFilter {
    /// Create a filter for datasets with the given header
    pub fn new(config: &ChineseFilterConfig, headers: &[String]) -> Result<Self> {
        let checked = match &config.columns {
            None => None,
            Some(names) => {
                if names.is_empty() {
                    return Err(Error::InvalidConfig(
                        "At least one column must be specified".to_string(),
                    ));
                }

                let mut positions = Vec::new();
                for name in names {
                    let before = positions.len();
                    // Repeated column names are all checked.
                    positions.extend(
                        headers
                            .iter()
                            .enumerate()
                            .filter(|(_, h)| *h == name)
                            .map(|(i, _)| i),
                    );
                    if positions.len() == before {
                        return Err(Error::UnknownColumn(name.clone()));
                    }
                }
                positions.sort_unstable();
                positions.dedup();
                Some(positions)
            }
        };

        debug!("CJK filter checking columns: {:?}", checked);

        Ok(Self {
            headers: headers.to_vec(),
            checked,
        })
    }

    /// Create a filter checking every column of `dataset`
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self {
            headers: dataset.headers().to_vec(),
            checked: None,
        }
    }

    /// Positions of checked cells that contain Chinese characters
    fn hits<'a>(&'a self, record: &'a Record) -> impl Iterator<Item = usize> + 'a {
        record
            .iter()
            .enumerate()
            .filter(move |(i, _)| match &self.checked {
                Some(positions) => positions.binary_search(i).is_ok(),
                None => true,
            })
            .filter(|(_, cell)| contains_chinese(cell))
            .map(|(i, _)| i)
    }

    /// Check if a record is kept (no checked cell contains Chinese text)
    pub fn is_accepted(&self, record: &Record) -> bool {
        self.hits(record).next().is_none()
    }

    /// Keep accepted records in their original order
    pub fn apply(&self, dataset: Dataset) -> Dataset {
        let headers = dataset.headers().to_vec();
        let records = dataset
            .into_records()
            .into_iter()
            .filter(|r| self.is_accepted(r))
            .collect();
        Dataset::new(headers, records)
    }

    /// Get statistics about Chinese text in a batch
    pub fn batch_stats(&self, records: &[Record]) -> CjkStats {
        let mut stats = CjkStats {
            column_hits: self.headers.iter().map(|h| (h.clone(), 0)).collect(),
            ..Default::default()
        };

        for record in records {
            stats.total += 1;

            let mut rejected = false;
            for i in self.hits(record) {
                rejected = true;
                if let Some((_, count)) = stats.column_hits.get_mut(i) {
                    *count += 1;
                }
            }

            if rejected {
                stats.removed += 1;
            } else {
                stats.kept += 1;
            }
        }

        stats
    }
}

/// Statistics about Chinese text in a batch of records
#[derive(Debug, Clone, Default, Serialize)]
pub struct CjkStats {
    pub total: usize,
    pub kept: usize,
    pub removed: usize,
    /// Cells with Chinese text, per column in header order
    pub column_hits: Vec<(String, usize)>,
}

impl CjkStats {
    /// Get removal rate
    pub fn removal_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.removed as f64 / self.total as f64
    }
}
