//! Serde helpers for loosely typed server payloads.
//!
//! Records come from the server or from storage written by older clients, so
//! scalar fields may arrive as a different JSON type than the model uses. The
//! helpers below coerce instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Accepts an identifier sent either as a JSON string or a number.
/// `null` or any other type becomes an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

/// Reads a flag the way a JavaScript truthiness check would.
///
/// `true`, non-zero numbers, non-empty strings and any array or object are
/// true; `false`, `0`, `""` and `null` are false.
pub fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Keeps the string entries of an array. Anything else, `null` included,
/// yields an empty list.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(text),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// `Some` for a JSON string, `None` for `null` or any other type.
pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        _ => None,
    })
}
