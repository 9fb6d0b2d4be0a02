//! Two-stage cleaning pipeline
//!
//! The filter writes an intermediate file and the sorter reads exactly that
//! file. The handoff path is passed explicitly rather than inferred from
//! default file names.

use crate::sort::SortConfig;
use crate::stages::{
    filter_chinese_records_with, sort_by_column, FilterReport, SortReport, StageOptions,
};
use crate::{Result, Stage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tabclean_filters::ChineseFilterConfig;
use tabclean_formats::CsvConfig;
use tracing::info;

pub const DEFAULT_INPUT: &str = "shopee.csv";
pub const DEFAULT_FILTERED: &str = "output_filtered.csv";
pub const DEFAULT_OUTPUT: &str = "output_sorted.csv";

/// Files touched by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelinePaths {
    /// Raw dataset
    pub input: PathBuf,
    /// Filter output, sort input
    pub filtered: PathBuf,
    /// Final sorted dataset
    pub output: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            filtered: PathBuf::from(DEFAULT_FILTERED),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Per-stage settings
#[derive(Debug, Clone, Default)]
pub struct PipelineSettings {
    pub csv: CsvConfig,
    pub filter: ChineseFilterConfig,
    pub sort: SortConfig,
}

/// Reports of both stages
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub filter: FilterReport,
    pub sort: SortReport,
}

impl fmt::Display for PipelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.filter)?;
        write!(f, "{}", self.sort)
    }
}

/// Run filter then sort with default settings
pub fn run_pipeline(paths: &PipelinePaths) -> Result<PipelineReport> {
    run_pipeline_with(paths, &PipelineSettings::default())
}

/// Run filter then sort. The sort stage is skipped if the filter fails.
pub fn run_pipeline_with(paths: &PipelinePaths, settings: &PipelineSettings) -> Result<PipelineReport> {
    info!("Running cleaning pipeline");
    info!("  Input: {:?}", paths.input);
    info!("  Filtered: {:?}", paths.filtered);
    info!("  Output: {:?}", paths.output);

    let options = StageOptions {
        csv: settings.csv.clone(),
        dry_run: false,
    };

    let filter = filter_chinese_records_with(&paths.input, &paths.filtered, &settings.filter, &options)
        .map_err(|e| e.in_stage(Stage::Filter))?;

    let sort = sort_by_column(&paths.filtered, &paths.output, &settings.sort, &options)
        .map_err(|e| e.in_stage(Stage::Sort))?;

    info!("Pipeline complete");

    Ok(PipelineReport { filter, sort })
}
