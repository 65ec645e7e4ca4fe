//! Core data structures for NAV extraction.
//!
//! Defines scheme records, line and value classifications, parse and
//! summary statistics used throughout the library.

use crate::constants::NOT_AVAILABLE;
use crate::feed::normalize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Unsigned decimal literal: digits, optionally a point and more digits.
static NUMERIC_NAV_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]*)?$").expect("Invalid NAV regex"));

/// A normalized scheme record extracted from one feed line
///
/// `name` is trimmed and free of double quotes and line control characters;
/// `value` is trimmed, single-line and otherwise verbatim. Both are
/// non-empty. Records can only be built through [`Record::new`], which
/// normalizes its input, so every record is safe to write as one TSV line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordFields")]
pub struct Record {
    #[serde(rename = "scheme_name")]
    name: String,
    #[serde(rename = "nav")]
    value: String,
}

impl Record {
    /// Normalize a raw name and NAV into a record
    ///
    /// Returns `None` when either field is empty after normalization.
    pub fn new(raw_name: &str, raw_value: &str) -> Option<Self> {
        normalize(raw_name, raw_value)
    }

    /// Build a record from fields that are already normalized
    pub(crate) fn from_normalized(name: String, value: String) -> Self {
        debug_assert!(!name.is_empty() && !value.is_empty());
        debug_assert!(!name.contains(['"', '\t', '\n', '\r']));
        debug_assert!(!value.contains('\n'));
        Self { name, value }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Classify the NAV value of this record
    pub fn value_class(&self) -> ValueClass {
        ValueClass::classify(&self.value)
    }
}

/// Wire shape of a record, normalized again on the way in
#[derive(Deserialize)]
struct RecordFields {
    scheme_name: String,
    nav: String,
}

impl TryFrom<RecordFields> for Record {
    type Error = String;

    fn try_from(fields: RecordFields) -> std::result::Result<Self, Self::Error> {
        Record::new(&fields.scheme_name, &fields.nav).ok_or_else(|| {
            format!(
                "scheme_name and nav must be non-empty: {:?}, {:?}",
                fields.scheme_name, fields.nav
            )
        })
    }
}

/// Ordered records in feed order
pub type RecordSet = Vec<Record>;

/// Category of a NAV value string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueClass {
    Numeric,
    NotAvailable,
    Invalid,
}

impl ValueClass {
    /// Classify a normalized value
    pub fn classify(value: &str) -> Self {
        if NUMERIC_NAV_REGEX.is_match(value) {
            ValueClass::Numeric
        } else if value == NOT_AVAILABLE {
            ValueClass::NotAvailable
        } else {
            ValueClass::Invalid
        }
    }
}

/// Why a raw line did not yield a record candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    Blank,
    ColumnHeader,
    SectionTitle,
    TooFewFields,
}

/// Outcome of classifying one raw feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Data { raw_name: &'a str, raw_value: &'a str },
    Skip(SkipReason),
}

/// Aggregate counts over a record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total: usize,
    pub valid_numeric: usize,
    pub not_available: usize,
}

impl SummaryStats {
    /// Records whose value is neither numeric nor the N.A. sentinel
    pub fn invalid(&self) -> usize {
        self.total
            .saturating_sub(self.valid_numeric)
            .saturating_sub(self.not_available)
    }
}

/// Line-level statistics gathered while parsing a feed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    pub lines_read: usize,
    pub data_lines: usize,
    pub records: usize,
    pub blank: usize,
    pub column_headers: usize,
    pub section_titles: usize,
    pub too_few_fields: usize,
    pub empty_fields: usize,
    /// Section titles in the order they appear
    pub sections: Vec<String>,
}

impl ParseStats {
    /// Total lines skipped before normalization
    pub fn lines_skipped(&self) -> usize {
        self.blank + self.column_headers + self.section_titles + self.too_few_fields
    }
}

/// Records parsed from a feed together with their line statistics
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub records: RecordSet,
    pub stats: ParseStats,
}
