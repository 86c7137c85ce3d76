//
//  wpcom-kit
//  api/backup.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Jetpack Backup downloads.
//!
//! Rewind is the host's backup/restore subsystem. A "download" is a backup
//! snapshot the server packages into an archive on request. The lifecycle:
//!
//! ```text
//! prepare_backup -> Queued -> Preparing (progress 0..100) -> Ready (url set)
//!                                                         \-> dismissed
//! ```
//!
//! All endpoints share the `wpcom/v2/sites/{site}/rewind/downloads/` root.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::client::{self, WpcomClient};
use super::common::decode::{self, DecodingError};
use super::common::ApiError;
use super::transport::ApiVersion;

/// Which parts of the site a backup download includes.
///
/// Everything is included by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JetpackRestoreTypes {
    pub themes: bool,
    pub plugins: bool,
    pub uploads: bool,
    /// Database tables
    pub sqls: bool,
    /// Files in the WordPress root
    pub roots: bool,
    /// Other files under `wp-content`
    pub contents: bool,
}

impl Default for JetpackRestoreTypes {
    fn default() -> Self {
        Self {
            themes: true,
            plugins: true,
            uploads: true,
            sqls: true,
            roots: true,
            contents: true,
        }
    }
}

/// Where a backup download is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupStatus {
    /// Accepted, not started
    Queued,
    /// The archive is being built
    Preparing,
    /// The archive can be downloaded from `url`
    Ready,
}

impl BackupStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
        }
    }
}

/// A backup download job snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JetpackBackup {
    pub download_id: u64,
    pub rewind_id: String,
    /// Point in time the backup captures
    pub backup_point: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    /// Percent complete while preparing
    pub progress: Option<u8>,
    pub download_count: Option<u32>,
    pub url: Option<String>,
    pub valid_until: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteBackup {
    download_id: u64,
    rewind_id: String,
    backup_point: String,
    started_at: String,
    #[serde(default)]
    progress: Option<Value>,
    #[serde(default)]
    download_count: Option<Value>,
    #[serde(default)]
    url: Option<Value>,
    #[serde(default)]
    valid_until: Option<Value>,
}

impl JetpackBackup {
    /// Decodes one backup object.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        Self::decode_at("", value)
    }

    fn decode_at(path: &str, value: Value) -> Result<Self, DecodingError> {
        let remote: RemoteBackup = decode::from_value(path, value)?;
        let field = |key: &str| decode::join(path, key);

        Ok(Self {
            download_id: remote.download_id,
            rewind_id: remote.rewind_id,
            backup_point: decode::parse_date(&field("backupPoint"), &remote.backup_point)?,
            started_at: decode::parse_date(&field("startedAt"), &remote.started_at)?,
            progress: decode::soft_from_value(&field("progress"), remote.progress.as_ref()),
            download_count: decode::soft_from_value(
                &field("downloadCount"),
                remote.download_count.as_ref(),
            ),
            url: decode::soft_from_value::<String>(&field("url"), remote.url.as_ref())
                .filter(|url| !url.is_empty()),
            valid_until: decode::soft(&field("validUntil"), remote.valid_until.as_ref(), |v| {
                let raw = v
                    .as_str()
                    .ok_or_else(|| DecodingError::new(field("validUntil"), "expected a string"))?;
                decode::parse_date(&field("validUntil"), raw)
            }),
        })
    }

    /// Decodes a list of backup objects.
    pub fn list_from_json(value: Value) -> Result<Vec<Self>, DecodingError> {
        let items: Vec<Value> = decode::from_value("", value)?;
        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| Self::decode_at(&decode::index("", i), item))
            .collect()
    }

    pub fn status(&self) -> BackupStatus {
        if self.url.is_some() {
            BackupStatus::Ready
        } else if self.progress.is_some() {
            BackupStatus::Preparing
        } else {
            BackupStatus::Queued
        }
    }
}

/// Body of a prepare request. Unset members are left out of the JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrepareBackupBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    rewind_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    types: Option<JetpackRestoreTypes>,
}

/// `sites/{site_id}/rewind/downloads/[{download_id}]`
pub(crate) fn downloads_path(site_id: u64, download_id: Option<u64>) -> String {
    let mut path = format!("sites/{}/rewind/downloads/", site_id);
    if let Some(id) = download_id {
        path.push_str(&id.to_string());
    }
    path
}

impl WpcomClient {
    /// Asks the server to package a backup download.
    ///
    /// # Parameters
    ///
    /// * `site_id` - The site to back up
    /// * `rewind_id` - Restore point to package; the latest one when `None`
    /// * `types` - Parts of the site to include; everything when `None`
    ///
    /// `POST wpcom/v2/sites/{site_id}/rewind/downloads/`
    pub async fn prepare_backup(
        &self,
        site_id: u64,
        rewind_id: Option<&str>,
        types: Option<JetpackRestoreTypes>,
    ) -> Result<JetpackBackup, ApiError> {
        let body = client::encode(&PrepareBackupBody { rewind_id, types })?;
        let response = self
            .post(ApiVersion::V2, &downloads_path(site_id, None), body)
            .await?;
        Ok(JetpackBackup::from_json(response)?)
    }

    /// Fetches the state of one backup download.
    ///
    /// `GET wpcom/v2/sites/{site_id}/rewind/downloads/{download_id}`
    pub async fn backup_status(
        &self,
        site_id: u64,
        download_id: u64,
    ) -> Result<JetpackBackup, ApiError> {
        let response = self
            .get(ApiVersion::V2, &downloads_path(site_id, Some(download_id)))
            .await?;
        Ok(JetpackBackup::from_json(response)?)
    }

    /// Fetches every backup download the site has.
    ///
    /// `GET wpcom/v2/sites/{site_id}/rewind/downloads/`
    pub async fn backup_statuses(&self, site_id: u64) -> Result<Vec<JetpackBackup>, ApiError> {
        let response = self
            .get(ApiVersion::V2, &downloads_path(site_id, None))
            .await?;
        Ok(JetpackBackup::list_from_json(response)?)
    }

    /// Hides a finished download from the site's backup list.
    ///
    /// `POST wpcom/v2/sites/{site_id}/rewind/downloads/{download_id}`
    pub async fn dismiss_backup(&self, site_id: u64, download_id: u64) -> Result<(), ApiError> {
        self.post(
            ApiVersion::V2,
            &downloads_path(site_id, Some(download_id)),
            json!({ "dismissed": true }),
        )
        .await?;
        Ok(())
    }
}
