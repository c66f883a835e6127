//! Tolerant field decoders for documents read back from the store.
//!
//! Documents may have been written by older clients or edited by hand, so
//! malformed values are dropped instead of failing the whole document.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::domain::{Location, PriceLevel, Role};

/// Decode a list of strings, dropping non-string elements.
/// A bare string becomes a one-element list; null or any other value is empty.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => vec![s],
        _ => Vec::new(),
    })
}

/// Decode an optional string, treating any non-string value as absent
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Decode a rating; anything that is not a finite number is absent
pub fn rating<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value
        .and_then(|v| v.as_f64())
        .filter(|r| r.is_finite()))
}

/// Decode a price level; unknown values are absent
pub fn price_level<'de, D>(deserializer: D) -> Result<Option<PriceLevel>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => PriceLevel::parse(&s),
        _ => None,
    })
}

/// Decode a budget; unknown or missing values fall back to medium
pub fn budget<'de, D>(deserializer: D) -> Result<PriceLevel, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(price_level(deserializer)?.unwrap_or_default())
}

/// Decode a role; only an explicit "admin" grants admin rights
pub fn role<'de, D>(deserializer: D) -> Result<Role, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("admin") => Role::Admin,
        _ => Role::User,
    })
}

/// Decode a `{lat, lng}` object; free-text addresses and partial objects are absent
pub fn location<'de, D>(deserializer: D) -> Result<Option<Location>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(value.and_then(|v| {
        let lat = v.get("lat")?.as_f64()?;
        let lng = v.get("lng")?.as_f64()?;
        Some(Location { lat, lng })
    }))
}

/// Decode a timestamp. RFC 3339 is preferred; naive date-times are read as UTC.
/// Anything else is absent.
pub fn timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::String(text)) = value else {
        return Ok(None);
    };
    let text = text.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(Some(parsed.with_timezone(&Utc)));
    }

    Ok(["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .map(|naive| naive.and_utc()))
}
