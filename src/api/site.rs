//
//  wpcom-kit
//  api/site.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site creation.
//!
//! The request is a flat domain value that encodes to a nested wire shape:
//!
//! ```json
//! {
//!   "client_id": "123",
//!   "client_secret": "secret",
//!   "lang_id": "en",
//!   "validate": false,
//!   "blog_name": "mynewsite",
//!   "blog_title": "My New Site",
//!   "public": 1,
//!   "find_available_url": false,
//!   "options": {
//!     "site_segment": 1,
//!     "site_vertical": "p13v1",
//!     "site_information": {"site_tagline": "Just another site"}
//!   }
//! }
//! ```
//!
//! `public` is an integer flag on the wire. Optional options are omitted when
//! unset; `site_information` only exists when a tagline was supplied.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::{self, WpcomClient};
use super::common::decode::{self, DecodingError};
use super::common::ApiError;
use super::transport::ApiVersion;

/// Outbound payload to create a site.
///
/// # Example
///
/// ```rust
/// use wpcom_kit::api::site::SiteCreationRequest;
///
/// let request = SiteCreationRequest {
///     tagline: Some("Notes from the field".to_string()),
///     ..SiteCreationRequest::new(1, "Field Notes", "fieldnotes", "en", "client-id", "secret")
/// };
/// let body = request.to_json().unwrap();
///
/// assert_eq!(body["public"], 1);
/// assert_eq!(body["options"]["site_information"]["site_tagline"], "Notes from the field");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteCreationRequest {
    pub segment_id: i64,
    pub vertical_id: Option<String>,
    pub title: String,
    pub tagline: Option<String>,
    /// Requested site address, sent as `blog_name`
    pub site_url: String,
    pub is_public: bool,
    pub language_id: String,
    /// Ask the server to validate the request without creating anything
    pub should_validate: bool,
    pub client_id: String,
    pub client_secret: String,
    /// IANA timezone, e.g. `Europe/London`
    pub timezone: Option<String>,
    /// Slug of the starter design to apply
    pub site_design: Option<String>,
    /// Name of the onboarding flow that produced the request
    pub creation_flow: Option<String>,
    /// Let the server pick a free address when `site_url` is taken
    pub find_available_url: bool,
}

impl SiteCreationRequest {
    /// A public, non-validating request with no optional parts.
    pub fn new(
        segment_id: i64,
        title: impl Into<String>,
        site_url: impl Into<String>,
        language_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            segment_id,
            vertical_id: None,
            title: title.into(),
            tagline: None,
            site_url: site_url.into(),
            is_public: true,
            language_id: language_id.into(),
            should_validate: false,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            timezone: None,
            site_design: None,
            creation_flow: None,
            find_available_url: false,
        }
    }

    /// Encodes the request into its wire shape.
    pub fn to_json(&self) -> Result<Value, ApiError> {
        client::encode(&WireSiteCreationRequest::from(self))
    }

    /// Decodes a request from its wire shape.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        let wire: WireSiteCreationRequest = decode::from_value("", value)?;
        Ok(wire.into_request())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct WireSiteCreationRequest {
    client_id: String,
    client_secret: String,
    lang_id: String,
    validate: bool,
    blog_name: String,
    blog_title: String,
    #[serde(with = "int_flag")]
    public: bool,
    #[serde(default)]
    find_available_url: bool,
    options: WireSiteOptions,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireSiteOptions {
    site_segment: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    site_vertical: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    site_information: Option<WireSiteInformation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone_string: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    site_creation_flow: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireSiteInformation {
    site_tagline: String,
}

impl From<&SiteCreationRequest> for WireSiteCreationRequest {
    fn from(request: &SiteCreationRequest) -> Self {
        Self {
            client_id: request.client_id.clone(),
            client_secret: request.client_secret.clone(),
            lang_id: request.language_id.clone(),
            validate: request.should_validate,
            blog_name: request.site_url.clone(),
            blog_title: request.title.clone(),
            public: request.is_public,
            find_available_url: request.find_available_url,
            options: WireSiteOptions {
                site_segment: request.segment_id,
                site_vertical: request.vertical_id.clone(),
                site_information: request.tagline.clone().map(|site_tagline| WireSiteInformation {
                    site_tagline,
                }),
                timezone_string: request.timezone.clone(),
                template: request.site_design.clone(),
                site_creation_flow: request.creation_flow.clone(),
            },
        }
    }
}

impl WireSiteCreationRequest {
    fn into_request(self) -> SiteCreationRequest {
        SiteCreationRequest {
            segment_id: self.options.site_segment,
            vertical_id: self.options.site_vertical,
            title: self.blog_title,
            tagline: self.options.site_information.map(|info| info.site_tagline),
            site_url: self.blog_name,
            is_public: self.public,
            language_id: self.lang_id,
            should_validate: self.validate,
            client_id: self.client_id,
            client_secret: self.client_secret,
            timezone: self.options.timezone_string,
            site_design: self.options.template,
            creation_flow: self.options.site_creation_flow,
            find_available_url: self.find_available_url,
        }
    }
}

/// Booleans the API spells as `0`/`1`.
mod int_flag {
    use serde::de::{self, Deserializer, Unexpected};
    use serde::{Deserialize, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Flag {
            Int(i64),
            Bool(bool),
        }

        match Flag::deserialize(deserializer)? {
            Flag::Int(0) => Ok(false),
            Flag::Int(1) => Ok(true),
            Flag::Int(other) => Err(de::Error::invalid_value(
                Unexpected::Signed(other),
                &"0 or 1",
            )),
            Flag::Bool(b) => Ok(b),
        }
    }
}

/// The site the server created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedSite {
    pub id: u64,
    pub title: String,
    pub url: String,
    /// XML-RPC endpoint of the new site
    pub xmlrpc: String,
}

/// Inbound payload describing the created site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCreationResponse {
    pub created_site: CreatedSite,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
struct RemoteSiteCreationResponse {
    blog_details: RemoteBlogDetails,
    success: bool,
}

#[derive(Debug, Deserialize)]
struct RemoteBlogDetails {
    blogid: Value,
    blogname: String,
    url: String,
    xmlrpc: String,
}

impl SiteCreationResponse {
    /// Decodes the response body.
    ///
    /// `blog_details.blogid` arrives as either a number or a numeric string.
    pub fn from_json(value: Value) -> Result<Self, DecodingError> {
        let remote: RemoteSiteCreationResponse = decode::from_value("", value)?;
        let details = remote.blog_details;

        let id = match &details.blogid {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        }
        .ok_or_else(|| {
            DecodingError::new(
                "blog_details.blogid",
                format!("expected a site id, got {}", details.blogid),
            )
        })?;

        Ok(Self {
            created_site: CreatedSite {
                id,
                title: details.blogname,
                url: details.url,
                xmlrpc: details.xmlrpc,
            },
            success: remote.success,
        })
    }
}

impl WpcomClient {
    /// Creates a new WordPress.com site.
    ///
    /// `POST rest/v1.1/sites/new`
    pub async fn create_site(
        &self,
        request: &SiteCreationRequest,
    ) -> Result<SiteCreationResponse, ApiError> {
        let body = request.to_json()?;
        let response = self.post(ApiVersion::V1_1, "sites/new", body).await?;
        Ok(SiteCreationResponse::from_json(response)?)
    }
}
