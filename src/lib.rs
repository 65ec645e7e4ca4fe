//! NAV Extractor Library
//!
//! Converts the AMFI mutual fund NAV feed, a semicolon-delimited text file
//! mixing scheme records with headers and category titles, into TSV and
//! JSON documents.
//!
//! This library provides tools for:
//! - Classifying feed lines and normalizing scheme names and NAV values
//! - Classifying NAV values as numeric, not available, or unrecognized
//! - Writing TSV and validated JSON artifacts without leaving partial files
//! - Summarizing extracted records
//! - Downloading the feed with timeouts and retries

pub mod cli;
pub mod config;
pub mod constants;
pub mod emit;
pub mod error;
pub mod feed;
pub mod fetch;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod summary;

// Re-export commonly used types
pub use config::Config;
pub use error::{NavError, Result};
pub use models::{ParseStats, ParsedFeed, Record, RecordSet, SummaryStats, ValueClass};
pub use pipeline::{FeedSource, OutputSelection, Pipeline, RunReport};
