//
//  wpcom-kit
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The service methods never talk to the network themselves. They describe a
//! request as plain data ([`TransportRequest`]) and hand it to a [`Transport`],
//! which performs the round-trip and returns the parsed JSON body together with
//! a little response metadata.
//!
//! ## Provided Implementation
//!
//! [`HttpTransport`] is the default transport, built on `reqwest`. It handles:
//!
//! - Joining version-prefixed paths onto the configured base URL
//! - Authentication header injection
//! - Timeouts and the `wpk/<version>` User-Agent
//! - Mapping non-success status codes to [`TransportError::Http`]
//!
//! Tests and embedding applications can supply their own [`Transport`].

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::auth::AuthCredential;

/// Default API root for WordPress.com.
pub const DEFAULT_BASE_URL: &str = "https://public-api.wordpress.com/";

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The API namespace an endpoint lives under.
///
/// WordPress.com serves its classic endpoints from `rest/v1.1` and the newer
/// Jetpack endpoints (rewind, scan, editor) from the `wpcom/v2` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    /// `rest/v1.1/`
    V1_1,
    /// `wpcom/v2/`
    V2,
}

impl ApiVersion {
    /// Returns the path prefix for this namespace, without slashes.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::V1_1 => "rest/v1.1",
            Self::V2 => "wpcom/v2",
        }
    }

    /// Prefixes an endpoint path with this namespace.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wpcom_kit::api::ApiVersion;
    ///
    /// assert_eq!(ApiVersion::V1_1.path("sites/new"), "rest/v1.1/sites/new");
    /// assert_eq!(ApiVersion::V2.path("sites/7/scan"), "wpcom/v2/sites/7/scan");
    /// ```
    pub fn path(self, endpoint: &str) -> String {
        format!("{}/{}", self.prefix(), endpoint.trim_start_matches('/'))
    }
}

/// HTTP verb for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request described as plain data.
///
/// `path` is relative to the transport's base URL and already carries its
/// version prefix. `body` is only set for writes.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
}

impl TransportRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path: path.into(),
            body: Some(body),
        }
    }
}

/// A successful response: the parsed body plus transport metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code (always 2xx for a successful response)
    pub status: u16,
    /// Parsed JSON body; `Value::Null` when the body was empty
    pub body: Value,
    /// Value of the `x-request-id` header, if the server sent one
    pub request_id: Option<String>,
}

impl TransportResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            request_id: None,
        }
    }
}

/// Failures raised by a [`Transport`].
///
/// Service methods forward these unchanged inside
/// [`ApiError::Transport`](super::ApiError::Transport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout, or other client-side failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `code` holds the machine-readable error slug WordPress.com returns
    /// (`error` for v1.1 endpoints, `code` for v2 endpoints) when present.
    #[error("HTTP {status}: {message}")]
    Http {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// The server answered with a success status but the body was not JSON.
    #[error("Response body is not valid JSON (HTTP {status}): {source}")]
    InvalidJson {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL or a request path could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl TransportError {
    /// Returns the HTTP status code for [`TransportError::Http`] and
    /// [`TransportError::InvalidJson`] failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::InvalidJson { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) => None,
        }
    }
}

/// Executes one HTTP round-trip.
///
/// Implementations must call the server at most once per `send` and must not
/// retry. The returned future resolves to exactly one outcome.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Builds a [`TransportError::Http`] from an error response body.
///
/// WordPress.com v1.1 endpoints answer with:
/// ```json
/// {"error": "unauthorized", "message": "User cannot access this private blog."}
/// ```
///
/// The `wpcom/v2` namespace follows the WP REST API shape:
/// ```json
/// {"code": "rest_forbidden", "message": "Sorry, you are not allowed to do that.",
///  "data": {"status": 403}}
/// ```
///
/// Anything else falls back to the raw body.
pub fn format_api_error(status: StatusCode, body: &str) -> TransportError {
    let mut code = None;
    let mut message = None;

    if let Ok(json) = serde_json::from_str::<Value>(body) {
        code = json
            .get("error")
            .or_else(|| json.get("code"))
            .and_then(|c| c.as_str())
            .map(str::to_string);
        message = json
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string);
    }

    let message = match message {
        Some(message) => message,
        None if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
        None => body.to_string(),
    };

    TransportError::Http {
        status: status.as_u16(),
        code,
        message,
    }
}

/// `reqwest`-backed [`Transport`].
///
/// # Example
///
/// ```rust,no_run
/// use wpcom_kit::api::HttpTransport;
/// use wpcom_kit::auth::AuthCredential;
///
/// let transport = HttpTransport::new("https://public-api.wordpress.com/")?
///     .with_auth(AuthCredential::bearer("your-token"));
/// # Ok::<(), wpcom_kit::api::TransportError>(())
/// ```
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    auth: Option<AuthCredential>,
}

impl HttpTransport {
    /// Creates a transport for the given API root with the default timeout.
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a transport with an explicit request timeout.
    ///
    /// A missing trailing slash on `base_url` is added so that endpoint
    /// paths are appended rather than replacing the last segment.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        Ok(Self {
            http: Client::builder()
                .user_agent(format!("wpk/{}", crate::VERSION))
                .timeout(timeout)
                .build()?,
            base_url: Url::parse(&normalized)?,
            auth: None,
        })
    }

    /// Sets the credentials applied to every request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a request path against the base URL.
    pub fn url_for(&self, request: &TransportRequest) -> Result<Url, TransportError> {
        Ok(self.base_url.join(request.path.trim_start_matches('/'))?)
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.auth.is_some())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(&request)?;

        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
        };
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(auth) = &self.auth {
            builder = auth.apply_to_request(builder);
        }

        let response = builder.send().await?;
        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(%status, path = %request.path, "request failed");
            return Err(format_api_error(status, &text));
        }

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|source| TransportError::InvalidJson {
                status: status.as_u16(),
                source,
            })?
        };

        Ok(TransportResponse {
            status: status.as_u16(),
            body,
            request_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_prefixes() {
        assert_eq!(ApiVersion::V2.path("sites/1/scan"), "wpcom/v2/sites/1/scan");
        assert_eq!(ApiVersion::V2.path("/me/gutenberg"), "wpcom/v2/me/gutenberg");
        assert_eq!(ApiVersion::V1_1.path("sites/new"), "rest/v1.1/sites/new");
    }

    #[test]
    fn test_url_for_appends_to_base_path() {
        let transport = HttpTransport::new("https://example.com/api").unwrap();
        let request = TransportRequest::get("/wpcom/v2/sites/9/rewind/downloads/");
        let url = transport.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.com/api/wpcom/v2/sites/9/rewind/downloads/"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpTransport::new("not a url").unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl(_)));
    }

    #[test]
    fn test_format_api_error_v1_shape() {
        let err = format_api_error(
            StatusCode::FORBIDDEN,
            r#"{"error":"unauthorized","message":"User cannot access this private blog."}"#,
        );
        match err {
            TransportError::Http { status, code, message } => {
                assert_eq!(status, 403);
                assert_eq!(code.as_deref(), Some("unauthorized"));
                assert_eq!(message, "User cannot access this private blog.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_format_api_error_v2_shape() {
        let err = format_api_error(
            StatusCode::NOT_FOUND,
            r#"{"code":"rest_no_route","message":"No route was found","data":{"status":404}}"#,
        );
        assert!(matches!(
            err,
            TransportError::Http { status: 404, code: Some(ref c), .. } if c == "rest_no_route"
        ));
    }

    #[test]
    fn test_format_api_error_raw_and_empty_bodies() {
        let raw = format_api_error(StatusCode::BAD_GATEWAY, "upstream timed out");
        assert_eq!(raw.to_string(), "HTTP 502: upstream timed out");

        let empty = format_api_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(empty.to_string(), "HTTP 500: Internal Server Error");
        assert_eq!(empty.status(), Some(500));
    }
}
