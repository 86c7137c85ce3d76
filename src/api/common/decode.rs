//
//  wpcom-kit
//  api/common/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Helpers shared by the remote-to-domain translators.
//!
//! Wire shapes are first deserialized into private `Remote*` structs with
//! serde, then translated into the public models. These helpers attach a
//! field path to every failure and implement the best-effort decoding used
//! for optional nested structures.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::Value;
use serde_path_to_error::Segment;
use thiserror::Error;

/// The response body did not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to decode `{path}`: {message}")]
pub struct DecodingError {
    /// Dotted path to the offending field, e.g. `threats[2].first_detected`
    pub path: String,
    /// What was wrong with it
    pub message: String,
}

impl DecodingError {
    pub fn new(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Appends `key` to a dotted field path.
pub(crate) fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

/// Appends an array index to a field path.
pub(crate) fn index(parent: &str, i: usize) -> String {
    format!("{}[{}]", parent, i)
}

/// Deserializes `value` into `T`.
///
/// Failures carry `path` extended with the location serde reached inside
/// `value`, so a wrong-typed `id` in the second threat reports `threats[1].id`.
pub(crate) fn from_value<T: DeserializeOwned>(
    path: &str,
    value: Value,
) -> Result<T, DecodingError> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().iter().fold(path.to_string(), |acc, segment| match segment {
            Segment::Seq { index: i } => index(&acc, *i),
            Segment::Map { key } => join(&acc, key),
            Segment::Enum { variant } => join(&acc, variant),
            _ => acc,
        });
        let path = if path.is_empty() { "<root>".to_string() } else { path };
        DecodingError::new(path, e.into_inner())
    })
}

/// Parses an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2020-06-02T13:28:51.000Z`, `2020-06-02T13:28:51+00:00`)
/// and the naive `2020-06-02 13:28:51` form some endpoints still emit, which
/// is read as UTC.
pub(crate) fn parse_date(path: &str, raw: &str) -> Result<DateTime<Utc>, DecodingError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|_| DecodingError::new(path, format!("invalid date {:?}", raw)))
}

/// Runs a best-effort decode of an optional nested value.
///
/// Missing and `null` values are absent. Any decode failure is logged at
/// debug level and also becomes absent; it never reaches the caller.
pub(crate) fn soft<T, E, F>(path: &str, value: Option<&Value>, decode: F) -> Option<T>
where
    E: fmt::Display,
    F: FnOnce(&Value) -> Result<T, E>,
{
    let value = value.filter(|v| !v.is_null())?;
    match decode(value) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            tracing::debug!(field = path, error = %e, "dropping undecodable optional field");
            None
        }
    }
}

/// Best-effort `serde` decode of an optional nested value.
pub(crate) fn soft_from_value<T: DeserializeOwned>(path: &str, value: Option<&Value>) -> Option<T> {
    soft(path, value, |v| serde_json::from_value::<T>(v.clone()))
}
