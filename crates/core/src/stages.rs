//! File-level cleaning stages
//!
//! Each stage loads a whole CSV file, transforms it once, and writes a new
//! file. Stages return a typed report on success; nothing is printed here.

use crate::sort::{sort_dataset, SortConfig};
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use tabclean_filters::{ChineseFilter, ChineseFilterConfig, CjkStats};
use tabclean_formats::{read_dataset, write_dataset, CsvConfig};
use tracing::info;

/// Options shared by every stage
#[derive(Debug, Clone, Default)]
pub struct StageOptions {
    pub csv: CsvConfig,
    /// Compute the report without writing output
    pub dry_run: bool,
}

/// Outcome of the Chinese-text filter
#[derive(Debug, Clone, Serialize)]
pub struct FilterReport {
    pub input: PathBuf,
    /// None on a dry run
    pub output: Option<PathBuf>,
    pub original_records: usize,
    pub filtered_records: usize,
    pub stats: CjkStats,
}

impl FilterReport {
    pub fn removed_records(&self) -> usize {
        self.original_records - self.filtered_records
    }
}

impl fmt::Display for FilterReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.output {
            Some(output) => writeln!(f, "Success! Filtered data saved to {}", output.display())?,
            None => writeln!(f, "Dry run: filtered data not written")?,
        }
        write!(
            f,
            "Original records: {}, Filtered records: {}",
            self.original_records, self.filtered_records
        )
    }
}

/// Outcome of the title sort
#[derive(Debug, Clone, Serialize)]
pub struct SortReport {
    pub input: PathBuf,
    /// None on a dry run
    pub output: Option<PathBuf>,
    pub column: String,
    pub descending: bool,
    pub original_records: usize,
    pub sorted_records: usize,
}

impl fmt::Display for SortReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.output {
            Some(output) => writeln!(f, "Success! Sorted data saved to {}", output.display())?,
            None => writeln!(f, "Dry run: sorted data not written")?,
        }
        write!(
            f,
            "Original records: {}, Sorted records: {}",
            self.original_records, self.sorted_records
        )
    }
}

/// Remove every record with Chinese text in any column
pub fn filter_chinese_records<P, Q>(input: P, output: Q) -> Result<FilterReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    filter_chinese_records_with(
        input.as_ref(),
        output.as_ref(),
        &ChineseFilterConfig::default(),
        &StageOptions::default(),
    )
}

/// Remove records with Chinese text in the configured columns
pub fn filter_chinese_records_with(
    input: &Path,
    output: &Path,
    config: &ChineseFilterConfig,
    options: &StageOptions,
) -> Result<FilterReport> {
    info!("Filtering records with Chinese text");
    info!("  Input: {:?}", input);
    info!("  Output: {:?}", output);
    info!("  Columns: {:?}", config.columns);

    let dataset = read_dataset(input, &options.csv)?;
    let original_records = dataset.len();

    let filter = ChineseFilter::new(config, dataset.headers())?;
    let stats = filter.batch_stats(dataset.records());
    let filtered = filter.apply(dataset);

    let output = persist(output, options, |path| {
        write_dataset(path, &filtered, &options.csv)
    })?;

    info!(
        "Kept {} of {} records ({} removed)",
        filtered.len(),
        original_records,
        stats.removed
    );

    Ok(FilterReport {
        input: input.to_path_buf(),
        output,
        original_records,
        filtered_records: filtered.len(),
        stats,
    })
}

/// Sort records by `title`, A-Z
pub fn sort_by_title<P, Q>(input: P, output: Q) -> Result<SortReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    sort_by_column(
        input.as_ref(),
        output.as_ref(),
        &SortConfig::default(),
        &StageOptions::default(),
    )
}

/// Sort records by the configured column
pub fn sort_by_column(
    input: &Path,
    output: &Path,
    config: &SortConfig,
    options: &StageOptions,
) -> Result<SortReport> {
    info!("Sorting records");
    info!("  Input: {:?}", input);
    info!("  Output: {:?}", output);
    info!("  Column: {} (descending: {})", config.column, config.descending);

    let dataset = read_dataset(input, &options.csv)?;
    let original_records = dataset.len();

    // Fails on a missing column before anything is written.
    let sorted = sort_dataset(dataset, config)?;

    let output = persist(output, options, |path| {
        write_dataset(path, &sorted, &options.csv)
    })?;

    info!("Sorted {} records", sorted.len());

    Ok(SortReport {
        input: input.to_path_buf(),
        output,
        column: config.column.clone(),
        descending: config.descending,
        original_records,
        sorted_records: sorted.len(),
    })
}

fn persist<F>(output: &Path, options: &StageOptions, write: F) -> Result<Option<PathBuf>>
where
    F: FnOnce(&Path) -> tabclean_formats::Result<()>,
{
    if options.dry_run {
        info!("Dry run, not writing {:?}", output);
        return Ok(None);
    }
    write(output)?;
    Ok(Some(output.to_path_buf()))
}
