//! Summary statistics over extracted records.

use crate::emit::read_tsv;
use crate::error::{NavError, Result};
use crate::models::{Record, SummaryStats, ValueClass};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Count records by NAV value class
///
/// Invalid values count towards `total` only.
pub fn summarize(records: &[Record]) -> SummaryStats {
    records
        .iter()
        .fold(SummaryStats::default(), |stats, record| {
            let stats = SummaryStats {
                total: stats.total + 1,
                ..stats
            };
            match record.value_class() {
                ValueClass::Numeric => SummaryStats {
                    valid_numeric: stats.valid_numeric + 1,
                    ..stats
                },
                ValueClass::NotAvailable => SummaryStats {
                    not_available: stats.not_available + 1,
                    ..stats
                },
                ValueClass::Invalid => stats,
            }
        })
}

/// Summarize a TSV artifact that has been fully written to disk
pub fn summarize_tsv(path: &Path) -> Result<SummaryStats> {
    if !path.exists() {
        return Err(NavError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs::read_to_string(path)?;
    let stats = summarize(&read_tsv(&text));

    debug!(
        "Summarized {}: {} total, {} numeric, {} N.A.",
        path.display(),
        stats.total,
        stats.valid_numeric,
        stats.not_available
    );

    Ok(stats)
}
