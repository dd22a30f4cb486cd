//! Decoding of whole collection documents.
//!
//! A document is either a bare array of records or an object with an `items`
//! array. Records that are not objects, or that fail to decode, are skipped.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;

const UTF8_BOM: char = '\u{feff}';

/// Decode a collection document.
///
/// A leading UTF-8 BOM is ignored. If the text is not valid JSON, one
/// [`lenient_repair`] is attempted before giving up.
///
/// # Errors
///
/// Returns the original parse error if neither the text nor its repaired form is valid JSON.
pub fn parse_collection<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, serde_json::Error> {
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);

    let root = match serde_json::from_str::<Value>(text) {
        Ok(root) => root,
        Err(e) => match serde_json::from_str::<Value>(&lenient_repair(text)) {
            Ok(root) => {
                warn!("collection document was malformed ({e}), using repaired form");
                root
            }
            Err(_) => return Err(e),
        },
    };

    Ok(records(root))
}

/// The records of an already parsed document.
#[must_use]
pub fn records<T: DeserializeOwned>(root: Value) -> Vec<T> {
    let items = match root {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    items
        .into_iter()
        .enumerate()
        .filter(|(_, item)| item.is_object())
        .filter_map(|(i, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                debug!("skipping record {i}: {e}");
                None
            }
        })
        .collect()
}

/// Best-effort fix for the corruptions hand editing tends to leave behind.
///
/// Keeps the text between the first `[` and the last `]`, closes the array if
/// it is unterminated, and closes an unbalanced string just before the last `}`.
#[must_use]
pub fn lenient_repair(text: &str) -> String {
    let mut t = text.trim().to_string();

    if let (Some(first), Some(last)) = (t.find('['), t.rfind(']')) {
        if last > first {
            t = t[first..=last].to_string();
        }
    }

    if !t.ends_with(']') {
        t.push(']');
    }

    if t.matches('"').count() % 2 == 1 {
        let insert_at = t
            .rfind('}')
            .or_else(|| t.rfind(']'))
            .filter(|&i| i > 0)
            .unwrap_or(t.len() - 1);
        t.insert(insert_at, '"');
    }

    t
}
