//! Line classification for the NAV feed.

use crate::constants::{
    COLUMN_HEADER_PREFIX, FIELD_DELIMITER, MIN_DATA_FIELDS, NAV_FIELD, SCHEME_NAME_FIELD,
    SECTION_TITLE_PREFIXES,
};
use crate::models::{LineClass, SkipReason};

/// Classify one raw feed line; the first matching rule wins
///
/// Blank lines, column headers and section titles are noise. Any other line
/// with at least five `;`-separated fields is data, carrying the scheme name
/// and NAV fields untouched. No trimming is applied here.
pub fn classify_line(line: &str) -> LineClass<'_> {
    if line.is_empty() {
        return LineClass::Skip(SkipReason::Blank);
    }

    if line.starts_with(COLUMN_HEADER_PREFIX) {
        return LineClass::Skip(SkipReason::ColumnHeader);
    }

    if SECTION_TITLE_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
    {
        return LineClass::Skip(SkipReason::SectionTitle);
    }

    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
    if fields.len() < MIN_DATA_FIELDS {
        return LineClass::Skip(SkipReason::TooFewFields);
    }

    LineClass::Data {
        raw_name: fields[SCHEME_NAME_FIELD],
        raw_value: fields[NAV_FIELD],
    }
}
