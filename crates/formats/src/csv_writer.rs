//! CSV writer
//!
//! Writes a header row and then one line per record, with minimal quoting
//! and no index column. Output paths ending in `.gz` are gzip-compressed.
//! File-backed writers must be finished with `close()` so buffered data and
//! the gzip trailer reach the disk.

use crate::reader::DatasetFormat;
use crate::{CsvConfig, Dataset, Error, Record, Result};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Destination of a file-backed writer
pub enum FileSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileSink::Plain(w) => w.write(buf),
            FileSink::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileSink::Plain(w) => w.flush(),
            FileSink::Gzip(w) => w.flush(),
        }
    }
}

impl FileSink {
    fn finish(self) -> io::Result<()> {
        match self {
            FileSink::Plain(mut w) => w.flush(),
            FileSink::Gzip(encoder) => encoder.finish()?.flush(),
        }
    }
}

/// CSV writer over any Write destination
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
    records_written: usize,
}

impl CsvWriter<FileSink> {
    /// Create (or truncate) the file at `path`
    pub fn create<P: AsRef<Path>>(path: P, config: &CsvConfig) -> Result<Self> {
        let path = path.as_ref();
        let format = DatasetFormat::from_path(path);
        let file = BufWriter::new(File::create(path)?);

        let sink = match format {
            DatasetFormat::CsvGzip => {
                debug!("Writing gzip-compressed CSV file: {:?}", path);
                FileSink::Gzip(GzEncoder::new(file, Compression::default()))
            }
            DatasetFormat::Csv => {
                debug!("Writing plain CSV file: {:?}", path);
                FileSink::Plain(file)
            }
        };

        Self::from_writer(sink, config)
    }

    /// Flush buffered rows and finish the file
    pub fn close(self) -> Result<()> {
        let sink = self.into_inner()?;
        sink.finish()?;
        Ok(())
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn from_writer(writer: W, config: &CsvConfig) -> Result<Self> {
        let writer = WriterBuilder::new()
            .delimiter(config.delimiter_byte()?)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(writer);

        Ok(Self {
            writer,
            records_written: 0,
        })
    }

    pub fn write_header(&mut self, headers: &[String]) -> Result<()> {
        self.writer.write_record(headers)?;
        Ok(())
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer.write_record(record.raw_fields())?;
        self.records_written += 1;
        Ok(())
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Flush and hand back the destination
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::Io(e.into_error()))
    }
}

/// Write a whole dataset to `path`, overwriting any existing file
pub fn write_dataset<P: AsRef<Path>>(path: P, dataset: &Dataset, config: &CsvConfig) -> Result<()> {
    let path = path.as_ref();
    let mut writer = CsvWriter::create(path, config)?;
    write_rows(&mut writer, dataset)?;
    debug!("Wrote {} records to {:?}", writer.records_written(), path);
    writer.close()
}

/// Write a whole dataset to any Write destination
pub fn write_dataset_to<W: Write>(destination: W, dataset: &Dataset, config: &CsvConfig) -> Result<W> {
    let mut writer = CsvWriter::from_writer(destination, config)?;
    write_rows(&mut writer, dataset)?;
    writer.into_inner()
}

fn write_rows<W: Write>(writer: &mut CsvWriter<W>, dataset: &Dataset) -> Result<()> {
    writer.write_header(dataset.headers())?;
    for record in dataset.records() {
        writer.write_record(record)?;
    }
    Ok(())
}
