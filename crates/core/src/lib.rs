//! Dataset cleaning stages
//!
//! This crate provides the two cleaning operations (Chinese-text filter and
//! column sort) as file-to-file stages with typed reports, plus an explicit
//! pipeline that feeds the filter's output into the sorter.

pub mod error;
pub mod pipeline;
pub mod sort;
pub mod stages;

pub use error::{Error, Result, Stage};
pub use pipeline::{run_pipeline, run_pipeline_with, PipelinePaths, PipelineReport, PipelineSettings};
pub use sort::{sort_dataset, SortConfig, DEFAULT_SORT_COLUMN};
pub use stages::{
    filter_chinese_records, filter_chinese_records_with, sort_by_column, sort_by_title,
    FilterReport, SortReport, StageOptions,
};
