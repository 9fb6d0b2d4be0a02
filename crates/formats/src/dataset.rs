//! In-memory dataset: one header shared by an ordered list of records

use crate::Record;

/// A fully loaded tabular dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, records: Vec<Record>) -> Self {
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }

    /// Number of records (the header is not counted)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first column named `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Replace the records, keeping the header
    pub fn with_records(self, records: Vec<Record>) -> Self {
        Self {
            headers: self.headers,
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NaValues;

    fn sample() -> Dataset {
        let na = NaValues::default();
        Dataset::new(
            vec!["title".into(), "price".into(), "title".into()],
            vec![
                Record::from_raw(["Phone Case", "5", "dup"], &na, 2),
                Record::from_raw(["Cable", "", "x"], &na, 3),
            ],
        )
    }

    #[test]
    fn test_column_index_first_match() {
        let ds = sample();
        assert_eq!(ds.column_index("title"), Some(0));
        assert_eq!(ds.column_index("price"), Some(1));
        assert_eq!(ds.column_index("missing"), None);
    }

    #[test]
    fn test_with_records_keeps_header() {
        let ds = sample();
        let headers = ds.headers().to_vec();
        let ds = ds.with_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.headers(), headers.as_slice());
    }
}
