//
//  wpcom-kit
//  api/scan.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jetpack Scan: scan state and the threats it detected.
//!
//! # Threat Payload
//!
//! ```json
//! {
//!   "id": 1234,
//!   "signature": "EICAR_AV_TEST",
//!   "description": "This is the standard EICAR antivirus test code.",
//!   "first_detected": "2020-06-02T13:28:51.000Z",
//!   "filename": "/var/www/html/wp-content/uploads/jptt_eicar.php",
//!   "fixer": {"fixer": "delete", "file": "/var/www/html/wp-content/uploads/jptt_eicar.php"},
//!   "context": {"3": "start test", "4": "VIRUS_SIG", "5": "end test", "marks": {"4": [[0, 9]]}},
//!   "status": "current"
//! }
//! ```
//!
//! `id`, `signature`, `description` and `first_detected` are required. Every
//! other field is decoded best-effort: if `fixer`, `extension`, `diff`,
//! `rows`, `context`, `fixed_on`, `filename` or `status` cannot be decoded it
//! is simply absent, and the threat itself still decodes.
//!
//! # Context Lines
//!
//! The `context` object holds source lines keyed by stringified line number,
//! plus a `marks` object listing `[start, length]` highlight pairs per line.
//! [`JetpackThreatContext::parse`] turns this into lines sorted by number with
//! half-open highlight ranges.

use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::client::WpcomClient;
use super::common::decode::{self, DecodingError};
use super::common::ApiError;
use super::transport::ApiVersion;

/// How a fixer would remediate a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ThreatFixType {
    /// Replace the file with a clean copy
    Replace,
    /// Delete the file
    Delete,
    /// Update the plugin or theme
    Update,
    /// Edit the file in place
    Edit,
    /// A fixer this client does not recognize
    Unknown,
}

impl From<&str> for ThreatFixType {
    fn from(raw: &str) -> Self {
        match raw {
            "replace" => Self::Replace,
            "delete" => Self::Delete,
            "update" => Self::Update,
            "edit" => Self::Edit,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ThreatFixType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Suggested remediation for a threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetpackScanThreatFixer {
    #[serde(rename = "fixer")]
    pub fix_type: ThreatFixType,

    /// File the fix applies to
    #[serde(default)]
    pub file: Option<String>,

    /// Version an update fixer upgrades to
    #[serde(default)]
    pub target: Option<String>,
}

/// Kind of extension a threat was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ExtensionType {
    Plugin,
    Theme,
    Unknown,
}

impl From<&str> for ExtensionType {
    fn from(raw: &str) -> Self {
        match raw {
            "plugin" => Self::Plugin,
            "theme" => Self::Theme,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ExtensionType {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Plugin or theme metadata attached to a threat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetpackThreatExtension {
    pub slug: String,
    pub name: String,
    #[serde(rename = "type")]
    pub extension_type: ExtensionType,
    #[serde(rename = "isPremium", default)]
    pub is_premium: bool,
    pub version: String,
}

/// Lifecycle status of a threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ThreatStatus {
    Current,
    Fixed,
    Ignored,
    Unknown,
}

impl ThreatStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Fixed => "fixed",
            Self::Ignored => "ignored",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for ThreatStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "current" => Self::Current,
            "fixed" => Self::Fixed,
            "ignored" => Self::Ignored,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ThreatStatus {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Where a threat lives, derived from which optional fields are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreatKind {
    Plugin,
    Theme,
    Database,
    File,
    Unknown,
}

impl ThreatKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plugin => "plugin",
            Self::Theme => "theme",
            Self::Database => "database",
            Self::File => "file",
            Self::Unknown => "unknown",
        }
    }
}

/// One source line of a threat context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreatContextLine {
    pub line_number: u64,
    pub contents: String,
    /// Half-open byte ranges to highlight within `contents`
    pub highlights: Vec<Range<usize>>,
}

/// Source excerpt around a threat. Lines are sorted by line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JetpackThreatContext {
    pub lines: Vec<ThreatContextLine>,
}

/// Structural problems in a `context` object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContextError {
    #[error("context is not an object")]
    NotAnObject,

    #[error("line key {0:?} is not an integer")]
    InvalidLineNumber(String),

    #[error("line {0} is not a string")]
    InvalidLine(u64),

    #[error("marks is not an object")]
    InvalidMarks,

    #[error("marks for line {0} are not a list of [start, length] pairs")]
    InvalidMark(u64),

    #[error("context has no lines")]
    Empty,
}

const MARKS_KEY: &str = "marks";

impl JetpackThreatContext {
    /// Parses a `context` object.
    ///
    /// Any structural violation is an error: a non-integer key, a line that
    /// is not a string, a mark that is not exactly two non-negative integers,
    /// or an object with no lines at all.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use wpcom_kit::api::scan::JetpackThreatContext;
    ///
    /// let context = JetpackThreatContext::parse(&json!({
    ///     "5": "end test",
    ///     "4": "VIRUS_SIG",
    ///     "marks": {"4": [[0, 9]]}
    /// })).unwrap();
    ///
    /// assert_eq!(context.lines[0].line_number, 4);
    /// assert_eq!(context.lines[0].highlights, vec![0..9]);
    /// ```
    pub fn parse(value: &Value) -> Result<Self, ContextError> {
        let object = value.as_object().ok_or(ContextError::NotAnObject)?;

        let marks = match object.get(MARKS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::Object(marks)) => Some(marks),
            Some(_) => return Err(ContextError::InvalidMarks),
        };

        if let Some(marks) = marks {
            for key in marks.keys() {
                parse_line_number(key)?;
            }
        }

        let mut lines = Vec::with_capacity(object.len());
        for (key, contents) in object {
            if key == MARKS_KEY {
                continue;
            }
            let line_number = parse_line_number(key)?;
            let contents = contents
                .as_str()
                .ok_or(ContextError::InvalidLine(line_number))?;
            let highlights = match marks.and_then(|m| m.get(key)) {
                Some(pairs) => parse_highlights(line_number, pairs)?,
                None => Vec::new(),
            };
            lines.push(ThreatContextLine {
                line_number,
                contents: contents.to_string(),
                highlights,
            });
        }

        if lines.is_empty() {
            return Err(ContextError::Empty);
        }
        lines.sort_by_key(|line| line.line_number);
        Ok(Self { lines })
    }

    /// Returns the line with the given number, if present.
    pub fn line(&self, line_number: u64) -> Option<&ThreatContextLine> {
        self.lines
            .binary_search_by_key(&line_number, |line| line.line_number)
            .ok()
            .map(|i| &self.lines[i])
    }
}

/// Line keys must be canonical decimal integers, so no two keys name the same line.
fn parse_line_number(key: &str) -> Result<u64, ContextError> {
    key.parse::<u64>()
        .ok()
        .filter(|n| n.to_string() == key)
        .ok_or_else(|| ContextError::InvalidLineNumber(key.to_string()))
}

fn parse_highlights(line_number: u64, pairs: &Value) -> Result<Vec<Range<usize>>, ContextError> {
    let invalid = || ContextError::InvalidMark(line_number);
    let pairs = pairs.as_array().ok_or_else(invalid)?;

    pairs
        .iter()
        .map(|pair| match pair.as_array().map(Vec::as_slice) {
            Some([start, length]) => {
                let start = mark_offset(start).ok_or_else(invalid)?;
                let length = mark_offset(length).ok_or_else(invalid)?;
                let end = start.checked_add(length).ok_or_else(invalid)?;
                Ok(start..end)
            }
            _ => Err(invalid()),
        })
        .collect()
}

/// Marks arrive as JSON numbers; integral floats such as `4.0` are accepted.
fn mark_offset(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 && f.fract() == 0.0 && f <= usize::MAX as f64 {
        Some(f as usize)
    } else {
        None
    }
}

/// A detected security threat on a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JetpackScanThreat {
    pub id: u64,
    pub signature: String,
    pub description: String,
    pub first_detected: DateTime<Utc>,
    pub file_name: Option<String>,
    pub fixed_on: Option<DateTime<Utc>>,
    pub status: Option<ThreatStatus>,
    pub fixer: Option<JetpackScanThreatFixer>,
    pub extension: Option<JetpackThreatExtension>,
    pub diff: Option<String>,
    /// Database rows affected by the threat, keyed by row id
    pub rows: Option<Map<String, Value>>,
    pub context: Option<JetpackThreatContext>,
}

/// Wire shape of a threat. Optional members stay raw for best-effort decoding.
#[derive(Debug, Deserialize)]
struct RemoteScanThreat {
    id: u64,
    signature: String,
    description: String,
    first_detected: String,
    #[serde(default)]
    filename: Option<Value>,
    #[serde(default)]
    fixed_on: Option<Value>,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    fixer: Option<Value>,
    #[serde(default)]
    extension: Option<Value>,
    #[serde(default)]
    diff: Option<Value>,
    #[serde(default)]
    rows: Option<Value>,
    #[serde(default)]
    context: Option<Value>,
}

impl JetpackScanThreat {
    /// Decodes one threat object.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        Self::decode_at("", value)
    }

    pub(crate) fn decode_at(path: &str, value: Value) -> Result<Self, DecodingError> {
        let remote: RemoteScanThreat = decode::from_value(path, value)?;
        let field = |key: &str| decode::join(path, key);

        let first_detected = decode::parse_date(&field("first_detected"), &remote.first_detected)?;

        Ok(Self {
            id: remote.id,
            signature: remote.signature,
            description: remote.description,
            first_detected,
            file_name: decode::soft_from_value(&field("filename"), remote.filename.as_ref()),
            fixed_on: decode::soft(&field("fixed_on"), remote.fixed_on.as_ref(), |v| {
                let raw = v
                    .as_str()
                    .ok_or_else(|| DecodingError::new(field("fixed_on"), "expected a string"))?;
                decode::parse_date(&field("fixed_on"), raw)
            }),
            status: decode::soft_from_value(&field("status"), remote.status.as_ref()),
            fixer: decode::soft_from_value(&field("fixer"), remote.fixer.as_ref()),
            extension: decode::soft_from_value(&field("extension"), remote.extension.as_ref()),
            diff: decode::soft_from_value(&field("diff"), remote.diff.as_ref()),
            rows: decode::soft_from_value(&field("rows"), remote.rows.as_ref()),
            context: decode::soft(
                &field("context"),
                remote.context.as_ref(),
                JetpackThreatContext::parse,
            ),
        })
    }

    /// Classifies the threat by where it was found.
    pub fn kind(&self) -> ThreatKind {
        if let Some(extension) = &self.extension {
            return match extension.extension_type {
                ExtensionType::Plugin => ThreatKind::Plugin,
                ExtensionType::Theme => ThreatKind::Theme,
                ExtensionType::Unknown => ThreatKind::Unknown,
            };
        }
        if self.rows.is_some() {
            return ThreatKind::Database;
        }
        if self.file_name.is_some() {
            return ThreatKind::File;
        }
        ThreatKind::Unknown
    }

    /// `true` when the server offered a fix this client understands.
    pub fn is_fixable(&self) -> bool {
        self.fixer
            .as_ref()
            .is_some_and(|f| f.fix_type != ThreatFixType::Unknown)
    }
}

/// Overall scanner state for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum ScanState {
    Idle,
    Scanning,
    Provisioning,
    Unavailable,
    Unknown,
}

impl ScanState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Provisioning => "provisioning",
            Self::Unavailable => "unavailable",
            Self::Unknown => "unknown",
        }
    }
}

impl From<&str> for ScanState {
    fn from(raw: &str) -> Self {
        match raw {
            "idle" => Self::Idle,
            "scanning" => Self::Scanning,
            "provisioning" => Self::Provisioning,
            "unavailable" => Self::Unavailable,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for ScanState {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Summary of one scan run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRun {
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    /// Percent complete
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub is_initial: bool,
}

/// Scan status for a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JetpackScan {
    pub state: ScanState,
    /// Why scanning is unavailable, when it is
    pub reason: Option<String>,
    pub most_recent: Option<ScanRun>,
    pub current: Option<ScanRun>,
    pub threats: Option<Vec<JetpackScanThreat>>,
}

#[derive(Debug, Deserialize)]
struct RemoteScan {
    state: ScanState,
    #[serde(default)]
    reason: Option<Value>,
    #[serde(default)]
    most_recent: Option<Value>,
    #[serde(default)]
    current: Option<Value>,
    #[serde(default)]
    threats: Option<Vec<Value>>,
}

impl JetpackScan {
    /// Decodes a scan payload.
    ///
    /// A threat that fails to decode fails the whole scan with the threat's
    /// index in the path; the run summaries are best-effort.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        let remote: RemoteScan = decode::from_value("", value)?;

        let threats = remote
            .threats
            .map(|threats| {
                threats
                    .into_iter()
                    .enumerate()
                    .map(|(i, threat)| {
                        JetpackScanThreat::decode_at(&decode::index("threats", i), threat)
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        Ok(Self {
            state: remote.state,
            reason: decode::soft_from_value("reason", remote.reason.as_ref()),
            most_recent: decode::soft_from_value("most_recent", remote.most_recent.as_ref()),
            current: decode::soft_from_value("current", remote.current.as_ref()),
            threats,
        })
    }

    /// Threats still awaiting action.
    pub fn active_threats(&self) -> impl Iterator<Item = &JetpackScanThreat> {
        self.threats
            .iter()
            .flatten()
            .filter(|t| matches!(t.status, None | Some(ThreatStatus::Current)))
    }
}

impl WpcomClient {
    /// Fetches the scan state and threat list for a site.
    ///
    /// `GET wpcom/v2/sites/{site_id}/scan`
    pub async fn scan(&self, site_id: u64) -> Result<JetpackScan, ApiError> {
        let body = self
            .get(ApiVersion::V2, &format!("sites/{}/scan", site_id))
            .await?;
        Ok(JetpackScan::from_json(body)?)
    }

    /// Marks a threat as ignored.
    ///
    /// `POST wpcom/v2/sites/{site_id}/alerts/{threat_id}`
    pub async fn ignore_threat(&self, site_id: u64, threat_id: u64) -> Result<(), ApiError> {
        self.post(
            ApiVersion::V2,
            &format!("sites/{}/alerts/{}", site_id, threat_id),
            json!({ "ignore": true }),
        )
        .await?;
        Ok(())
    }
}
