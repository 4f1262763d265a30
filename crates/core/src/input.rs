//! Lenient deserializers for request bodies.
//!
//! The frontend posts HTML form values, so ids and integers may arrive as
//! numeric strings, empty inputs arrive as `""`, and dates arrive either as
//! full RFC 3339 instants or as bare `YYYY-MM-DD` values. These helpers are
//! used with `#[serde(deserialize_with = ...)]` on the request DTOs.
//!
//! Two update policies are expressed here:
//!
//! - *truthy* fields (`optional_text`, `optional_id`, `optional_timestamp`):
//!   `null`, `""` and, for ids, `0` all read as `None`, so an update leaves
//!   the stored value alone.
//! - *present* fields (`nullable_id`, `nullable_int`): used together with
//!   `#[serde(default)]` so that an absent key is `None`, an explicit `null`
//!   is `Some(None)` and a value is `Some(Some(v))`.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer};

use crate::types::{DbId, Timestamp};

/// An integer as sent by the frontend: a JSON number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum IntInput {
    Number(i64),
    Text(String),
}

impl IntInput {
    /// `Ok(None)` for blank strings.
    fn into_int(self) -> Result<Option<i64>, String> {
        match self {
            IntInput::Number(n) => Ok(Some(n)),
            IntInput::Text(s) if s.trim().is_empty() => Ok(None),
            IntInput::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| format!("invalid integer '{s}'")),
        }
    }
}

/// A timestamp as sent by the frontend: a string or epoch milliseconds.
#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampInput {
    Millis(i64),
    Text(String),
}

/// String that treats `""` as absent.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// Id that treats `null`, `""` and `0` as absent.
pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IntInput>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(input) => {
            let id = input.into_int().map_err(de::Error::custom)?;
            Ok(id.filter(|id| *id != 0))
        }
    }
}

/// Id whose explicit `null` is meaningful (clears the link).
///
/// Pair with `#[serde(default)]`.
pub fn nullable_id<'de, D>(deserializer: D) -> Result<Option<Option<DbId>>, D::Error>
where
    D: Deserializer<'de>,
{
    nullable_int(deserializer)
}

/// Integer whose explicit `null` is meaningful.
///
/// Pair with `#[serde(default)]`.
pub fn nullable_int<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IntInput>::deserialize(deserializer)?;
    match value {
        None => Ok(Some(None)),
        Some(input) => input.into_int().map(Some).map_err(de::Error::custom),
    }
}

/// Integer accepting numbers or numeric strings; `""` reads as absent.
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<IntInput>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(input) => input.into_int().map_err(de::Error::custom),
    }
}

/// Timestamp that treats `null` and `""` as absent.
///
/// See [`parse_timestamp`] for the accepted string forms.
pub fn optional_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TimestampInput>::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(TimestampInput::Millis(ms)) => DateTime::from_timestamp_millis(ms)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("timestamp out of range: {ms}"))),
        Some(TimestampInput::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(TimestampInput::Text(s)) => parse_timestamp(&s).map(Some).map_err(de::Error::custom),
    }
}

/// Parse a timestamp string.
///
/// Accepted forms, tried in order:
///
/// | Input                            | Interpretation          |
/// |----------------------------------|-------------------------|
/// | `2024-02-15T10:30:00Z` (RFC 3339)| as given                |
/// | `2024-02-15 10:30:00.000 +00:00` | as given                |
/// | `2024-02-15`                     | midnight UTC            |
/// | `2024-02-15T10:30[:00[.000]]`    | server local time       |
pub fn parse_timestamp(input: &str) -> Result<Timestamp, String> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f %:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(local_to_utc(naive));
        }
    }

    Err(format!("invalid date '{input}'"))
}

fn local_to_utc(naive: NaiveDateTime) -> Timestamp {
    match Local.from_local_datetime(&naive).earliest() {
        Some(dt) => dt.with_timezone(&Utc),
        None => naive.and_utc(),
    }
}
