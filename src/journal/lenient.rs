//! Tolerant field deserializers.
//!
//! Entries come from an upstream extraction step and are only loosely shaped.
//! These helpers resolve a malformed field to its default instead of failing
//! the whole entry: a scalar of the wrong type becomes `None`, and a list keeps
//! only the elements that parse.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize `T`, falling back to `T::default()` when the value has the wrong shape.
///
/// Use together with `#[serde(default)]` so that a missing key also yields the default.
pub fn field<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Deserialize a list, dropping elements that do not parse as `T`.
///
/// Anything other than an array (including `null`) yields an empty list.
pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let items = match value {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// Deserialize an entry identifier given as either a string or a number.
pub fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "entry id must be a non-empty string or a number, got {other}"
        ))),
    }
}
