//! Scheme name and NAV field cleanup.

use crate::models::Record;

/// Normalize the raw scheme name and NAV fields of a data line
///
/// Both fields are trimmed. Double quotes are removed from the name, then
/// tab, newline and carriage return characters each become a single space.
/// Whitespace uncovered by quote removal (`" Fund "`) is trimmed again so
/// the name never carries leading or trailing blanks. Returns `None` when
/// either field ends up empty, or when the value spans more than one line.
pub fn normalize(raw_name: &str, raw_value: &str) -> Option<Record> {
    let cleaned: String = raw_name
        .trim()
        .chars()
        .filter(|&c| c != '"')
        .map(|c| match c {
            '\t' | '\n' | '\r' => ' ',
            other => other,
        })
        .collect();
    let name = cleaned.trim().to_string();
    let value = raw_value.trim();

    if name.is_empty() || value.is_empty() || value.contains('\n') {
        return None;
    }

    Some(Record::from_normalized(name, value.to_string()))
}
