//! Whole-feed parsing.
//!
//! Runs every line through the classifier and normalizer in feed order,
//! folding line outcomes into the record set and its [`ParseStats`].

use super::classifier::classify_line;
use super::normalizer::normalize;
use crate::error::{NavError, Result};
use crate::models::{LineClass, ParseStats, ParsedFeed, SkipReason};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Parse a feed held in memory
pub fn parse_str(text: &str) -> ParsedFeed {
    text.lines()
        .enumerate()
        .fold(ParsedFeed::default(), |feed, (line_num, line)| {
            accumulate(feed, line_num + 1, line)
        })
}

/// Parse a feed from any buffered reader
///
/// Lines are split on `\n` with a trailing `\r` removed. Bytes that are not
/// valid UTF-8 are replaced rather than failing the whole feed.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<ParsedFeed> {
    reader
        .split(b'\n')
        .enumerate()
        .try_fold(ParsedFeed::default(), |feed, (line_num, bytes)| {
            let raw = bytes?;
            let trimmed = raw.strip_suffix(b"\r").unwrap_or(&raw[..]);
            let line: Cow<'_, str> = String::from_utf8_lossy(trimmed);
            Ok(accumulate(feed, line_num + 1, &line))
        })
}

/// Parse a feed file from disk
pub fn parse_file(path: &Path) -> Result<ParsedFeed> {
    if !path.exists() {
        return Err(NavError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let feed = parse_reader(BufReader::new(file))?;

    debug!(
        "Parsed {}: {} lines, {} records, {} skipped, {} rejected",
        path.display(),
        feed.stats.lines_read,
        feed.stats.records,
        feed.stats.lines_skipped(),
        feed.stats.empty_fields
    );

    Ok(feed)
}

fn accumulate(mut feed: ParsedFeed, line_num: usize, line: &str) -> ParsedFeed {
    let stats = &mut feed.stats;
    stats.lines_read += 1;

    match classify_line(line) {
        LineClass::Data {
            raw_name,
            raw_value,
        } => {
            stats.data_lines += 1;
            match normalize(raw_name, raw_value) {
                Some(record) => {
                    stats.records += 1;
                    feed.records.push(record);
                }
                None => {
                    trace!("Line {}: empty scheme name or NAV", line_num);
                    stats.empty_fields += 1;
                }
            }
        }
        LineClass::Skip(reason) => {
            trace!("Line {}: skipped ({:?})", line_num, reason);
            record_skip(stats, reason, line);
        }
    }

    feed
}

fn record_skip(stats: &mut ParseStats, reason: SkipReason, line: &str) {
    match reason {
        SkipReason::Blank => stats.blank += 1,
        SkipReason::ColumnHeader => stats.column_headers += 1,
        SkipReason::SectionTitle => {
            stats.section_titles += 1;
            stats.sections.push(line.trim().to_string());
        }
        SkipReason::TooFewFields => stats.too_few_fields += 1,
    }
}
