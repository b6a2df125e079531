//! Forgiving serde helpers for fields of older or hand-edited documents
//!
//! Each helper accepts any JSON value and degrades to an empty/absent value
//! instead of failing the surrounding struct.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Decode a record field by field
///
/// Starts from `T::default()` and lays each stored field over it, nested
/// objects included. A field whose value would make the record fail to
/// decode keeps its default, the rest of the record survives.
pub fn fields<T>(value: &Value) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let fallback = T::default();
    let stored = match value {
        Value::Object(map) => map,
        Value::Null => return fallback,
        other => {
            log::warn!("Expected a record, found {}; using defaults", kind(other));
            return fallback;
        }
    };
    let Ok(mut root) = serde_json::to_value(&fallback) else {
        return fallback;
    };

    let accepts = |candidate: &Value| serde_json::from_value::<T>(candidate.clone()).is_ok();
    overlay(&mut root, "", stored, &accepts);
    serde_json::from_value(root).unwrap_or(fallback)
}

fn overlay(
    root: &mut Value,
    path: &str,
    stored: &Map<String, Value>,
    accepts: &dyn Fn(&Value) -> bool,
) {
    for (key, incoming) in stored {
        let pointer = format!("{}/{}", path, key.replace('~', "~0").replace('/', "~1"));
        let nested = matches!(root.pointer(&pointer), Some(Value::Object(_)));
        if let (true, Value::Object(inner)) = (nested, incoming) {
            overlay(root, &pointer, inner, accepts);
            continue;
        }

        let Some(parent) = root.pointer_mut(path).and_then(Value::as_object_mut) else {
            continue;
        };
        let previous = parent.insert(key.clone(), incoming.clone());
        if accepts(root) {
            continue;
        }

        log::warn!("Saved field '{}' unreadable ({}); using its default", pointer, kind(incoming));
        if let Some(parent) = root.pointer_mut(path).and_then(Value::as_object_mut) {
            match previous {
                Some(old) => parent.insert(key.clone(), old),
                None => parent.remove(key),
            };
        }
    }
}

/// Scalar that falls back to `T::default()` when missing, null or mistyped
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// List whose undecodable elements are skipped
pub fn vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Array(items) = value else {
        if !value.is_null() {
            log::warn!("Expected a list, found {}; using empty list", kind(&value));
        }
        return Ok(Vec::new());
    };

    let total = items.len();
    let kept: Vec<T> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if kept.len() != total {
        log::warn!("Dropped {} unreadable list entries", total - kept.len());
    }
    Ok(kept)
}

/// RFC 3339 timestamp, `None` when missing or unreadable
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}

/// Calendar date; accepts ISO (`2026-10-16`) and the long form (`Fri Oct 16 2026`)
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(parse_date))
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%a %b %d %Y"))
        .ok()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
