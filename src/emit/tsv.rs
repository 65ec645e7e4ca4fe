//! Tab-separated output.

use crate::constants::TSV_HEADER;
use crate::feed::normalize;
use crate::models::{Record, RecordSet};

/// Render records as TSV with the fixed header line
///
/// Every line, including the last record, ends with a newline.
pub fn to_tsv(records: &[Record]) -> String {
    let mut out = String::with_capacity(TSV_HEADER.len() + 1 + records.len() * 64);
    out.push_str(TSV_HEADER);
    out.push('\n');

    for record in records {
        out.push_str(record.name());
        out.push('\t');
        out.push_str(record.value());
        out.push('\n');
    }

    out
}

/// Read records back from TSV text produced by [`to_tsv`]
///
/// The header line is skipped. Each remaining line is split on its first tab
/// and normalized again, so lines without a tab or with an empty field are
/// dropped the same way the feed parser drops them.
pub fn read_tsv(text: &str) -> RecordSet {
    let mut lines = text.lines().peekable();
    if lines.peek() == Some(&TSV_HEADER) {
        lines.next();
    }

    lines
        .filter_map(|line| line.split_once('\t'))
        .filter_map(|(name, value)| normalize(name, value))
        .collect()
}
