//! Lenient field decoders for write payloads.
//!
//! Clients of the portfolio site send loosely typed JSON: years arrive as
//! strings, titles arrive as numbers and single tags arrive as bare strings.
//! These decoders cast such values the way the document store does, and fail
//! with a cast message when a value cannot be cast.
//!
//! Every decoder is used together with `#[serde(default)]`, so it only runs
//! for fields present in the body. The outer `Option` is presence and the
//! inner one is the value: an explicit `null` decodes to `Some(None)`.
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode a present string field; numbers and booleans are rendered as text.
pub(crate) fn optional_string<'de, D>(
    deserializer: D,
) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(text)) => Ok(Some(Some(text))),
        Some(Value::Number(number)) => Ok(Some(Some(number.to_string()))),
        Some(Value::Bool(flag)) => Ok(Some(Some(flag.to_string()))),
        Some(other) => Err(D::Error::custom(cast_message("string", &other.to_string()))),
    }
}

/// Decode a present integer field from a JSON number or numeric string.
///
/// The empty string casts to `null`.
pub(crate) fn optional_integer<'de, D>(
    deserializer: D,
) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Some(None)),
        Some(Value::Number(number)) => number_to_integer(&number)
            .map(|value| Some(Some(value)))
            .ok_or_else(|| D::Error::custom(cast_message("Number", &number.to_string()))),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(Some(None));
            }
            trimmed
                .parse::<i64>()
                .map(|value| Some(Some(value)))
                .map_err(|_| D::Error::custom(cast_message("Number", &text)))
        }
        Some(other) => Err(D::Error::custom(cast_message("Number", &other.to_string()))),
    }
}

/// Decode a present list-of-strings field.
///
/// A bare string becomes a one-element list; numbers and booleans inside a
/// list are rendered as strings.
pub(crate) fn optional_string_list<'de, D>(
    deserializer: D,
) -> Result<Option<Option<Vec<String>>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(text)) => Ok(Some(Some(vec![text]))),
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                Value::Number(number) => Ok(number.to_string()),
                Value::Bool(flag) => Ok(flag.to_string()),
                other => Err(D::Error::custom(cast_message("[string]", &other.to_string()))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(|items| Some(Some(items))),
        Some(other) => Err(D::Error::custom(cast_message("[string]", &other.to_string()))),
    }
}

fn number_to_integer(number: &serde_json::Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    let value = number.as_f64()?;
    (value.fract() == 0.0 && value.abs() < i64::MAX as f64).then_some(value as i64)
}

fn cast_message(kind: &str, value: &str) -> String {
    format!("Cast to {kind} failed for value {value}")
}
