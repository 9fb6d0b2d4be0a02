//! Unified dataset reader abstraction
//!
//! Provides format detection based on file extensions, a streaming reader
//! interface, and whole-file loading into a `Dataset`.

use crate::{CsvConfig, CsvReader, Dataset, Record, Result};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Supported on-disk formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    CsvGzip,
}

impl DatasetFormat {
    /// Detect the format from the file extension
    ///
    /// - `.gz` (including `.csv.gz`) - gzip-compressed CSV
    /// - anything else, or no extension - plain CSV
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("gz") => DatasetFormat::CsvGzip,
            _ => DatasetFormat::Csv,
        }
    }
}

/// Trait for dataset readers providing unified interface
pub trait DatasetReader: Iterator<Item = Result<Record>> {
    /// Column names in file order
    fn headers(&self) -> &[String];

    /// Get total file size in bytes if known
    fn total_bytes(&self) -> Option<u64>;

    /// Get number of bytes processed so far
    fn bytes_processed(&self) -> u64;

    /// Get the number of records processed
    fn records_processed(&self) -> usize;
}

impl<R: Read> DatasetReader for CsvReader<R> {
    fn headers(&self) -> &[String] {
        CsvReader::headers(self)
    }

    fn total_bytes(&self) -> Option<u64> {
        CsvReader::total_bytes(self)
    }

    fn bytes_processed(&self) -> u64 {
        CsvReader::bytes_processed(self)
    }

    fn records_processed(&self) -> usize {
        CsvReader::records_processed(self)
    }
}

/// Factory function to open a dataset with automatic format detection
pub fn open_dataset<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Box<dyn DatasetReader>> {
    let path = path.as_ref();
    let format = DatasetFormat::from_path(path);

    info!("Opening dataset: {:?} (format: {:?})", path, format);

    Ok(Box::new(CsvReader::open_with_config(path, config)?))
}

/// Load a whole dataset into memory
pub fn read_dataset<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Dataset> {
    let mut reader = open_dataset(path, config)?;
    collect_dataset(reader.as_mut())
}

/// Load a whole dataset from any Read source (plain CSV)
pub fn read_dataset_from<R: Read>(source: R, config: &CsvConfig) -> Result<Dataset> {
    let mut reader = CsvReader::new_with_config(source, config, None)?;
    collect_dataset(&mut reader)
}

fn collect_dataset(reader: &mut dyn DatasetReader) -> Result<Dataset> {
    let headers = reader.headers().to_vec();
    let records = reader.collect::<Result<Vec<_>>>()?;
    Ok(Dataset::new(headers, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_format_detection() {
        assert_eq!(DatasetFormat::from_path(Path::new("shopee.csv")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("shopee.CSV")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("shopee.txt")), DatasetFormat::Csv);
        assert_eq!(DatasetFormat::from_path(Path::new("shopee")), DatasetFormat::Csv);
        assert_eq!(
            DatasetFormat::from_path(Path::new("shopee.csv.gz")),
            DatasetFormat::CsvGzip
        );
        assert_eq!(DatasetFormat::from_path(Path::new("shopee.GZ")), DatasetFormat::CsvGzip);
    }

    #[test]
    fn test_open_dataset_any_extension() {
        let dir = tempfile::tempdir().unwrap();

        for name in ["listing.txt", "listing", "listing.tsv.bak"] {
            let path = dir.path().join(name);
            std::fs::write(&path, "title
Phone Case
").unwrap();

            let dataset = read_dataset(&path, &CsvConfig::default()).unwrap();
            assert_eq!(dataset.len(), 1, "{}", name);
        }
    }

    #[test]
    fn test_read_dataset() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("csv");

        {
            let mut file = std::fs::File::create(&temp_path).unwrap();
            writeln!(file, "title,price").unwrap();
            writeln!(file, "Banana,1").unwrap();
            writeln!(file, "Apple,2").unwrap();
        }

        let dataset = read_dataset(&temp_path, &CsvConfig::default()).unwrap();
        assert_eq!(dataset.headers(), ["title", "price"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1].cells[0].raw(), "Apple");

        std::fs::remove_file(temp_path).unwrap();
    }

    #[test]
    fn test_dataset_reader_progress() {
        let temp_file = NamedTempFile::new().unwrap();
        let temp_path = temp_file.path().with_extension("csv");

        {
            let mut file = std::fs::File::create(&temp_path).unwrap();
            writeln!(file, "title").unwrap();
            writeln!(file, "hello").unwrap();
            writeln!(file, "world").unwrap();
        }

        let mut reader = open_dataset(&temp_path, &CsvConfig::default()).unwrap();
        assert_eq!(reader.records_processed(), 0);

        let _ = reader.next();
        assert_eq!(reader.records_processed(), 1);
        assert!(reader.bytes_processed() > 0);
        assert!(reader.total_bytes().is_some());

        std::fs::remove_file(temp_path).unwrap();
    }

    #[test]
    fn test_read_dataset_from_stops_on_error() {
        let data = "title\nA\nB,extra\n";
        let result = read_dataset_from(data.as_bytes(), &CsvConfig::default());
        assert!(matches!(result, Err(Error::InvalidFile(_))));
    }
}
