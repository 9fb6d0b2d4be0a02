//! File format readers and writers for dataset cleaning
//!
//! This crate reads CSV datasets (plain or gzip-compressed) into memory,
//! classifies every cell, and writes datasets back out unchanged apart from
//! row membership and order.

pub mod csv_reader;
pub mod csv_writer;
pub mod dataset;
pub mod error;
pub mod reader;
pub mod record;

pub use csv_reader::{CsvConfig, CsvReader};
pub use csv_writer::{write_dataset, write_dataset_to, CsvWriter};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use reader::{open_dataset, read_dataset, read_dataset_from, DatasetFormat, DatasetReader};
pub use record::{Cell, NaValues, Record, DEFAULT_NA_VALUES};
