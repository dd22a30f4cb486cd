//! Field decoders that never reject a record.
//!
//! The site's data files are hand edited and never validated, so a field of the
//! wrong shape decodes as its empty value instead of failing the collection.

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;

/// The text of an identifier-like value.
///
/// Strings are returned as-is, numbers by their JSON text (`12`, `1.5`).
/// Every other JSON type has no text.
#[must_use]
pub fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decode a string-ish field, falling back to an empty string.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value).unwrap_or_default())
}

/// Decode an optional string-ish field.
///
/// Empty strings are treated as absent, the same way the page script treats
/// them as falsy.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_of(&value).filter(|s| !s.is_empty()))
}

/// Decode a list of string-ish values, dropping elements that have no text.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().filter_map(text_of).collect()),
        _ => Ok(Vec::new()),
    }
}

/// Decode a list of records, dropping elements that do not decode.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(opt_vec(deserializer)?.unwrap_or_default())
}

/// Like [`vec`], but keeps the difference between "missing" and "empty".
///
/// A value that is not an array decodes as `None`.
///
/// # Errors
///
/// Only fails if the underlying deserializer cannot produce any JSON value.
pub fn opt_vec<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
