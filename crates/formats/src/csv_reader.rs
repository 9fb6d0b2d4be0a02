//! CSV reader
//!
//! Reads a header row followed by records, classifying every cell on the way
//! in. Gzip-compressed input is detected from the file extension.

use crate::reader::DatasetFormat;
use crate::{Error, NaValues, Record, Result, DEFAULT_NA_VALUES};
use csv::{ByteRecord, ReaderBuilder};
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: char = '\u{feff}';

/// Configuration shared by the CSV reader and writer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvConfig {
    /// Field delimiter, must be ASCII
    pub delimiter: char,
    /// Buffer size for the underlying reader
    pub buffer_size: usize,
    /// Raw cell texts read as missing values
    pub na_values: Vec<String>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            buffer_size: 64 * 1024, // 64KB buffer
            na_values: DEFAULT_NA_VALUES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CsvConfig {
    /// Delimiter as the single byte the csv crate expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::InvalidConfig(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.delimiter
            )))
        }
    }

    pub fn na(&self) -> NaValues {
        NaValues::new(self.na_values.iter().cloned())
    }
}

/// CSV reader yielding one `Record` per data row
pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
    headers: Vec<String>,
    na: NaValues,
    row: ByteRecord,
    records_read: usize,
    padded_rows: usize,
    total_bytes: Option<u64>,
}

impl CsvReader<Box<dyn Read>> {
    /// Open a CSV file with the default configuration
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, &CsvConfig::default())
    }

    /// Open a CSV file, auto-detecting gzip compression
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        let format = DatasetFormat::from_path(path);
        let file = File::open(path)?;
        let total_bytes = file.metadata()?.len();

        match format {
            DatasetFormat::CsvGzip => {
                debug!("Opening gzip-compressed CSV file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(GzDecoder::new(file));
                Self::new_with_config(reader, config, None)
            }
            DatasetFormat::Csv => {
                debug!("Opening plain CSV file: {:?}", path);
                let reader: Box<dyn Read> = Box::new(file);
                Self::new_with_config(reader, config, Some(total_bytes))
            }
        }
    }
}

impl<R: Read> CsvReader<R> {
    /// Create a CSV reader from any Read source
    pub fn new(reader: R) -> Result<Self> {
        Self::new_with_config(reader, &CsvConfig::default(), None)
    }

    /// Create a CSV reader with custom configuration. The header row is read
    /// immediately.
    pub fn new_with_config(reader: R, config: &CsvConfig, total_bytes: Option<u64>) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(config.delimiter_byte()?)
            .buffer_capacity(config.buffer_size)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = decode_headers(reader.byte_headers()?)?;
        if headers.is_empty() {
            return Err(Error::EmptyInput);
        }
        debug!("CSV header: {:?}", headers);

        Ok(Self {
            reader,
            headers,
            na: config.na(),
            row: ByteRecord::new(),
            records_read: 0,
            padded_rows: 0,
            total_bytes,
        })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get the number of records read
    pub fn records_processed(&self) -> usize {
        self.records_read
    }

    /// Get the number of bytes consumed (decompressed bytes for gzip input)
    pub fn bytes_processed(&self) -> u64 {
        self.reader.position().byte()
    }

    /// Get total file size if known
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Rows that were shorter than the header and padded with missing cells
    pub fn padded_rows(&self) -> usize {
        self.padded_rows
    }

    fn decode_row(&mut self) -> Result<Record> {
        let line = self.row.position().map(|p| p.line()).unwrap_or(0);
        let width = self.headers.len();

        if self.row.len() > width {
            return Err(Error::InvalidFile(format!(
                "line {}: expected {} fields, saw {}",
                line,
                width,
                self.row.len()
            )));
        }

        let mut fields = Vec::with_capacity(width);
        for (field, bytes) in self.row.iter().enumerate() {
            let text = std::str::from_utf8(bytes).map_err(|_| Error::Decode { line, field })?;
            fields.push(text.to_string());
        }

        if fields.len() < width {
            warn!(
                "Line {} has {} of {} fields, padding with missing values",
                line,
                fields.len(),
                width
            );
            fields.resize(width, String::new());
            self.padded_rows += 1;
        }

        self.records_read += 1;
        Ok(Record::from_raw(fields, &self.na, line))
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_byte_record(&mut self.row) {
            Ok(false) => None, // EOF
            Ok(true) => Some(self.decode_row()),
            Err(e) => Some(Err(Error::Csv(e))),
        }
    }
}

fn decode_headers(raw: &ByteRecord) -> Result<Vec<String>> {
    let mut headers = Vec::with_capacity(raw.len());
    for (field, bytes) in raw.iter().enumerate() {
        let text = std::str::from_utf8(bytes).map_err(|_| Error::Decode { line: 1, field })?;
        let text = if field == 0 {
            text.trim_start_matches(UTF8_BOM)
        } else {
            text
        };
        headers.push(text.to_string());
    }
    Ok(headers)
}
