//! Boolean flag conversion
//!
//! SQLite stores flags as 0/1 integers and older JSON files carry them as
//! numbers or strings. Every conversion goes through here.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn to_db(flag: bool) -> i64 {
    i64::from(flag)
}

pub fn from_db(value: i64) -> bool {
    value != 0
}

/// Interpret a loosely typed JSON flag.
///
/// `true`, non-zero numbers and the strings `"true"`, `"1"` and `"on"`
/// count as set. Everything else, including `null`, is unset.
pub fn from_json(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "on"
        ),
        _ => false,
    }
}

/// `deserialize_with` helper for `bool` fields
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_json(&value))
}

/// `deserialize_with` helper for `Option<bool>` fields; `null` stays `None`
pub fn deserialize_opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(from_json(&other)),
    })
}
