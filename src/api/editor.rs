//
//  wpcom-kit
//  api/editor.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Editor settings: which content editor a site opens posts in.
//!
//! The server reports one editor per platform:
//!
//! ```json
//! {"editor_mobile": "gutenberg", "editor_web": "classic"}
//! ```
//!
//! Unrecognized values never fail a decode. The mobile editor falls back to
//! [`MobileEditor::Aztec`] and the web editor to [`WebEditor::Gutenberg`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::client::WpcomClient;
use super::common::decode::{self, DecodingError};
use super::common::ApiError;
use super::transport::ApiVersion;

/// Editor used by the mobile apps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum MobileEditor {
    /// The block editor
    Gutenberg,
    /// The native rich-text editor, used when nothing else is configured
    #[default]
    Aztec,
}

impl MobileEditor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gutenberg => "gutenberg",
            Self::Aztec => "aztec",
        }
    }
}

impl From<&str> for MobileEditor {
    fn from(raw: &str) -> Self {
        match raw {
            "gutenberg" => Self::Gutenberg,
            _ => Self::Aztec,
        }
    }
}

impl From<String> for MobileEditor {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Editor used by the web dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum WebEditor {
    Classic,
    #[default]
    Gutenberg,
}

impl From<&str> for WebEditor {
    fn from(raw: &str) -> Self {
        match raw {
            "classic" => Self::Classic,
            _ => Self::Gutenberg,
        }
    }
}

impl From<String> for WebEditor {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

/// Which editors a site uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EditorSettings {
    pub mobile: MobileEditor,
    pub web: WebEditor,
}

/// Wire shape of the settings payload.
#[derive(Debug, Deserialize)]
struct RemoteEditorSettings {
    #[serde(default)]
    editor_mobile: Option<Value>,
    #[serde(default)]
    editor_web: Option<Value>,
}

impl EditorSettings {
    /// Decodes the settings payload.
    ///
    /// Missing, `null`, or non-string editor values take their defaults.
    /// Only a body that is not an object at all is a decoding error.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        let remote: RemoteEditorSettings = decode::from_value("", value)?;
        Ok(Self::from_remote(remote))
    }

    fn from_remote(remote: RemoteEditorSettings) -> Self {
        Self {
            mobile: remote
                .editor_mobile
                .as_ref()
                .and_then(Value::as_str)
                .map(MobileEditor::from)
                .unwrap_or_default(),
            web: remote
                .editor_web
                .as_ref()
                .and_then(Value::as_str)
                .map(WebEditor::from)
                .unwrap_or_default(),
        }
    }
}

/// Parses the `me/gutenberg` response, a map of site id to mobile editor.
fn parse_site_editors(value: Value) -> Result<BTreeMap<u64, MobileEditor>, DecodingError> {
    let raw: BTreeMap<String, String> = decode::from_value("", value)?;
    raw.into_iter()
        .map(|(site, editor)| {
            let id = site
                .parse::<u64>()
                .map_err(|_| DecodingError::new(site.clone(), "site id is not an integer"))?;
            Ok((id, MobileEditor::from(editor)))
        })
        .collect()
}

impl WpcomClient {
    /// Fetches the editor settings for a site.
    ///
    /// `GET wpcom/v2/sites/{site_id}/gutenberg`
    pub async fn editor_settings(&self, site_id: u64) -> Result<EditorSettings, ApiError> {
        let body = self
            .get(ApiVersion::V2, &format!("sites/{}/gutenberg", site_id))
            .await?;
        Ok(EditorSettings::from_json(body)?)
    }

    /// Designates the mobile editor for one site and returns the new settings.
    ///
    /// `POST wpcom/v2/sites/{site_id}/gutenberg`
    pub async fn set_mobile_editor(
        &self,
        site_id: u64,
        editor: MobileEditor,
    ) -> Result<EditorSettings, ApiError> {
        let body = json!({
            "editor": editor.as_str(),
            "platform": "mobile",
        });
        let response = self
            .post(ApiVersion::V2, &format!("sites/{}/gutenberg", site_id), body)
            .await?;
        Ok(EditorSettings::from_json(response)?)
    }

    /// Designates the mobile editor for every site of the current user.
    ///
    /// With `only_if_empty`, sites that already have an editor keep it. The
    /// result maps each site id to the editor it ended up with.
    ///
    /// `POST wpcom/v2/me/gutenberg`
    pub async fn set_mobile_editor_for_all_sites(
        &self,
        editor: MobileEditor,
        only_if_empty: bool,
    ) -> Result<BTreeMap<u64, MobileEditor>, ApiError> {
        let body = json!({
            "editor": editor.as_str(),
            "platform": "mobile",
            "set_only_if_empty": only_if_empty,
        });
        let response = self.post(ApiVersion::V2, "me/gutenberg", body).await?;
        Ok(parse_site_editors(response)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::testing::RecordingTransport;
    use crate::api::transport::HttpMethod;

    #[test]
    fn test_gutenberg_mobile() {
        let settings = EditorSettings::from_json(json!({
            "editor_mobile": "gutenberg",
            "editor_web": "gutenberg"
        }))
        .unwrap();
        assert_eq!(settings.mobile, MobileEditor::Gutenberg);
        assert_eq!(settings.web, WebEditor::Gutenberg);
    }

    #[test]
    fn test_unknown_mobile_editor_defaults_to_aztec() {
        let settings = EditorSettings::from_json(json!({"editor_mobile": "classic"})).unwrap();
        assert_eq!(settings.mobile, MobileEditor::Aztec);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = EditorSettings::from_json(json!({})).unwrap();
        assert_eq!(settings, EditorSettings::default());

        let settings =
            EditorSettings::from_json(json!({"editor_mobile": null, "editor_web": 7})).unwrap();
        assert_eq!(settings.mobile, MobileEditor::Aztec);
        assert_eq!(settings.web, WebEditor::Gutenberg);
    }

    #[test]
    fn test_classic_web_editor() {
        let settings = EditorSettings::from_json(json!({"editor_web": "classic"})).unwrap();
        assert_eq!(settings.web, WebEditor::Classic);
    }

    #[test]
    fn test_non_object_is_an_error() {
        assert!(EditorSettings::from_json(json!("gutenberg")).is_err());
    }

    #[test]
    fn test_editor_enum_deserializes_with_fallback() {
        let editor: MobileEditor = serde_json::from_value(json!("whatever")).unwrap();
        assert_eq!(editor, MobileEditor::Aztec);
        assert_eq!(serde_json::to_value(MobileEditor::Gutenberg).unwrap(), json!("gutenberg"));
    }

    #[tokio::test]
    async fn test_set_mobile_editor_request() {
        let transport = RecordingTransport::replying(json!({"editor_mobile": "gutenberg"}));
        let settings = transport
            .client()
            .set_mobile_editor(12, MobileEditor::Gutenberg)
            .await
            .unwrap();
        assert_eq!(settings.mobile, MobileEditor::Gutenberg);

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "wpcom/v2/sites/12/gutenberg");
        assert_eq!(
            request.body,
            Some(json!({"editor": "gutenberg", "platform": "mobile"}))
        );
    }

    #[tokio::test]
    async fn test_set_editor_for_all_sites() {
        let transport = RecordingTransport::replying(json!({"1": "gutenberg", "22": "aztec"}));
        let sites = transport
            .client()
            .set_mobile_editor_for_all_sites(MobileEditor::Gutenberg, true)
            .await
            .unwrap();
        assert_eq!(sites.get(&1), Some(&MobileEditor::Gutenberg));
        assert_eq!(sites.get(&22), Some(&MobileEditor::Aztec));
        assert_eq!(
            transport.last_request().body.unwrap()["set_only_if_empty"],
            json!(true)
        );
    }

    #[tokio::test]
    async fn test_site_editor_map_rejects_bad_ids() {
        let transport = RecordingTransport::replying(json!({"abc": "gutenberg"}));
        let err = transport
            .client()
            .set_mobile_editor_for_all_sites(MobileEditor::Aztec, false)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decoding(ref e) if e.path == "abc"));
    }
}
