//! Lenient field deserializers for upstream JSON.
//!
//! The published files mix strings, numbers and nulls in the same column
//! (roll numbers, gross compensation). These helpers fold all of them
//! into strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a string, number, bool or null into an optional string.
pub fn opt_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// Like [`opt_lenient_string`], mapping null to an empty string.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(opt_lenient_string(deserializer)?.unwrap_or_default())
}
