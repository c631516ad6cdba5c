//! Column conversions shared by the repositories.
//!
//! Timestamps are written by [`timestamp`]; rows seeded by hand through the
//! `sqlite3` shell may carry `CURRENT_TIMESTAMP` text instead, so reads accept both.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

use crate::error::DatabaseError;

/// Storage form of a timestamp: RFC 3339 in UTC with microseconds.
///
/// Fixed precision keeps TEXT ordering equal to time ordering.
#[must_use]
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Inverse of [`timestamp`], also accepting `YYYY-MM-DD HH:MM:SS`.
///
/// # Errors
///
/// `DatabaseError::Query` naming the offending text.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").map(|n| n.and_utc()))
        .map_err(|e| DatabaseError::Query(format!("bad timestamp '{s}': {e}")))
}

/// Decode a status/role column through the enum's serde names.
///
/// # Errors
///
/// `DatabaseError::Query` for a value with no matching variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    T::deserialize(serde::de::value::StrDeserializer::<serde::de::value::Error>::new(s))
        .map_err(|e| DatabaseError::Query(format!("unexpected value '{s}' in enum column: {e}")))
}

/// A nullable TEXT column where empty text also means "absent".
///
/// # Errors
///
/// Fails only if the column cannot be read as text.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    Ok(row.get::<Option<String>>(idx)?.filter(|s| !s.is_empty()))
}

/// Parse a JSON string-array column. NULL, empty, and non-array text give `[]`.
///
/// Rows written by older clients may hold a bare comma list, so anything
/// that is not a JSON array is split on commas instead.
#[must_use]
pub fn parse_string_list(s: Option<&str>) -> Vec<String> {
    match s.map(str::trim) {
        None | Some("") => Vec::new(),
        Some(s) => serde_json::from_str::<Vec<String>>(s).unwrap_or_else(|_| split_list(s)),
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
#[must_use]
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Serialize a string list for storage as a JSON array.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if serialization fails.
pub fn to_json_list(items: &[String]) -> Result<String, DatabaseError> {
    serde_json::to_string(items).map_err(|e| DatabaseError::Other(e.into()))
}

/// Convert an optional `&str` into a libSQL parameter (NULL when absent).
pub fn opt_value(s: Option<&str>) -> libsql::Value {
    s.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}
