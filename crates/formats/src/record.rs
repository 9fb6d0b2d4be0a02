//! Record data structure for unified dataset representation

use serde_json::{Map, Number, Value};
use std::collections::HashSet;

/// Raw cell texts that are read as missing values
pub const DEFAULT_NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Set of raw tokens classified as missing
#[derive(Debug, Clone)]
pub struct NaValues {
    tokens: HashSet<String>,
}

impl NaValues {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens: HashSet<String> = tokens.into_iter().map(Into::into).collect();
        // An empty cell is always missing.
        tokens.insert(String::new());
        Self { tokens }
    }

    pub fn contains(&self, raw: &str) -> bool {
        self.tokens.contains(raw)
    }
}

impl Default for NaValues {
    fn default() -> Self {
        Self::new(DEFAULT_NA_VALUES.iter().copied())
    }
}

/// A single cell, classified on read. Every variant keeps the raw text so the
/// cell is written back exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Missing(String),
    Number(String),
    Text(String),
}

impl Cell {
    /// Classify a raw field
    pub fn parse(raw: String, na: &NaValues) -> Self {
        if na.contains(&raw) {
            Cell::Missing(raw)
        } else if looks_numeric(&raw) {
            Cell::Number(raw)
        } else {
            Cell::Text(raw)
        }
    }

    /// The raw field as read from the file
    pub fn raw(&self) -> &str {
        match self {
            Cell::Missing(raw) | Cell::Number(raw) | Cell::Text(raw) => raw,
        }
    }

    /// Textual representation of the value, or `None` for a missing cell
    pub fn text(&self) -> Option<&str> {
        match self {
            Cell::Missing(_) => None,
            Cell::Number(raw) | Cell::Text(raw) => Some(raw),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing(_))
    }

    /// JSON view used for inspection output
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Missing(_) => Value::Null,
            Cell::Number(raw) => {
                let trimmed = raw.trim();
                if let Ok(i) = trimmed.parse::<i64>() {
                    Value::Number(i.into())
                } else {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .and_then(Number::from_f64)
                        .map(Value::Number)
                        .unwrap_or_else(|| Value::String(raw.clone()))
                }
            }
            Cell::Text(raw) => Value::String(raw.clone()),
        }
    }
}

fn looks_numeric(raw: &str) -> bool {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return false;
    }
    trimmed.parse::<i64>().is_ok() || trimmed.parse::<f64>().is_ok()
}

/// A single record from a dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Cells in header order
    pub cells: Vec<Cell>,
    /// Line of the source file the record started on
    pub source_line: u64,
}

impl Record {
    /// Create a new record
    pub fn new(cells: Vec<Cell>, source_line: u64) -> Self {
        Self { cells, source_line }
    }

    /// Build a record from raw fields, classifying each one
    pub fn from_raw<I, S>(fields: I, na: &NaValues, source_line: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cells = fields
            .into_iter()
            .map(|f| Cell::parse(f.into(), na))
            .collect();
        Self::new(cells, source_line)
    }

    pub fn get(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Raw fields, ready to be written out
    pub fn raw_fields(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(Cell::raw)
    }

    /// JSON object view keyed by column name.
    ///
    /// Repeated column names keep the first value.
    pub fn to_json(&self, headers: &[String]) -> Value {
        let mut map = Map::new();
        for (name, cell) in headers.iter().zip(self.iter()) {
            if !map.contains_key(name) {
                map.insert(name.clone(), cell.to_json());
            }
        }
        Value::Object(map)
    }
}
