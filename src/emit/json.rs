//! JSON output.
//!
//! Records are rendered as an array of `{"scheme_name": ..., "nav": ...}`
//! objects, one per line, and the finished document is parsed back before it
//! is handed out.

use crate::constants::{JSON_NAME_KEY, JSON_NAV_KEY};
use crate::error::{NavError, Result};
use crate::models::Record;
use tracing::debug;

/// Render records as a validated JSON array
pub fn to_json(records: &[Record]) -> Result<String> {
    let document = render(records)?;
    validate(&document, records.len())?;
    Ok(document)
}

/// Encode a string as a quoted JSON string literal
///
/// Uses serde_json's encoder, a single left-to-right pass, so a backslash
/// inserted for a quote is never escaped a second time. Control characters
/// become `\n`, `\t`, `\u00XX` and friends.
pub fn quote_json_string(input: &str) -> Result<String> {
    serde_json::to_string(input)
        .map_err(|e| NavError::serialization(format!("cannot encode {:?}: {}", input, e)))
}

fn render(records: &[Record]) -> Result<String> {
    if records.is_empty() {
        return Ok("[]\n".to_string());
    }

    let objects = records
        .iter()
        .map(|record| {
            Ok(format!(
                "  {{\"{}\": {}, \"{}\": {}}}",
                JSON_NAME_KEY,
                quote_json_string(record.name())?,
                JSON_NAV_KEY,
                quote_json_string(record.value())?
            ))
        })
        .collect::<Result<Vec<String>>>()?;

    Ok(format!("[\n{}\n]\n", objects.join(",\n")))
}

fn validate(document: &str, expected_len: usize) -> Result<()> {
    let parsed: serde_json::Value = serde_json::from_str(document)
        .map_err(|e| NavError::serialization(format!("generated JSON does not parse: {}", e)))?;

    let len = parsed
        .as_array()
        .map(Vec::len)
        .ok_or_else(|| NavError::serialization("generated JSON is not an array"))?;

    if len != expected_len {
        return Err(NavError::serialization(format!(
            "generated JSON holds {} objects, expected {}",
            len, expected_len
        )));
    }

    debug!("Validated JSON document with {} objects", len);
    Ok(())
}
