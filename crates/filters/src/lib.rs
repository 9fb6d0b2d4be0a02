//! Record filters for dataset cleaning
//!
//! This crate decides which records of a dataset are kept. The CJK filter
//! drops every record with Chinese (Han) characters in any checked column.

pub mod cjk;
pub mod error;

pub use cjk::{
    contains_chinese, contains_chinese_text, is_cjk_char, record_contains_chinese, ChineseFilter,
    ChineseFilterConfig, CjkStats, CJK_RANGES,
};
pub use error::{Error, Result};
