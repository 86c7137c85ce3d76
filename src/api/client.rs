//
//  wpcom-kit
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Service Client for the WordPress.com API
//!
//! [`WpcomClient`] is the entry point for every endpoint. It owns a shared
//! [`Transport`] and nothing else, so it is cheap to clone and safe to use
//! from many tasks at once. The resource modules ([`backup`](super::backup),
//! [`scan`](super::scan), [`editor`](super::editor), [`site`](super::site))
//! add their service methods to it.
//!
//! ## Features
//!
//! - Version-prefixed path composition (`rest/v1.1`, `wpcom/v2`)
//! - Request body encoding with a distinct encoding error
//! - One transport call per method, no retries
//! - Transport errors forwarded unchanged

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use super::common::ApiError;
use super::transport::{ApiVersion, HttpTransport, Transport, TransportError, TransportRequest};
use crate::auth::AuthCredential;
use crate::config::ApiConfig;

/// The main client for interacting with the WordPress.com REST API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use wpcom_kit::api::WpcomClient;
/// use wpcom_kit::auth::AuthCredential;
///
/// let client = WpcomClient::wordpress_com(AuthCredential::bearer("your-token"))?;
/// # Ok::<(), wpcom_kit::api::TransportError>(())
/// ```
///
/// Any [`Transport`] implementation can be plugged in with
/// [`WpcomClient::new`], which is how the tests drive the client without a
/// network.
#[derive(Clone)]
pub struct WpcomClient {
    transport: Arc<dyn Transport>,
}

impl WpcomClient {
    /// Creates a client on top of an arbitrary transport.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Creates a client sharing an existing transport.
    pub fn from_shared(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Creates a client for `public-api.wordpress.com` with the given credentials.
    pub fn wordpress_com(auth: AuthCredential) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(super::transport::DEFAULT_BASE_URL)?.with_auth(auth);
        Ok(Self::new(transport))
    }

    /// Creates a client from the `[api]` section of the configuration file.
    ///
    /// # Parameters
    ///
    /// * `config` - Base URL and timeout
    /// * `auth` - Credentials to attach, if any. Site creation with client
    ///   credentials works unauthenticated; everything else needs a token.
    pub fn from_config(
        config: &ApiConfig,
        auth: Option<AuthCredential>,
    ) -> Result<Self, TransportError> {
        let mut transport = HttpTransport::with_timeout(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )?;
        if let Some(auth) = auth {
            transport = transport.with_auth(auth);
        }
        Ok(Self::new(transport))
    }

    /// Issues a GET for a version-prefixed endpoint and returns the parsed body.
    pub(crate) async fn get(&self, version: ApiVersion, endpoint: &str) -> Result<Value, ApiError> {
        self.execute(TransportRequest::get(version.path(endpoint))).await
    }

    /// Issues a POST with an encoded body and returns the parsed response.
    pub(crate) async fn post(
        &self,
        version: ApiVersion,
        endpoint: &str,
        body: Value,
    ) -> Result<Value, ApiError> {
        self.execute(TransportRequest::post(version.path(endpoint), body))
            .await
    }

    async fn execute(&self, request: TransportRequest) -> Result<Value, ApiError> {
        tracing::debug!(method = %request.method, path = %request.path, "dispatching request");
        let response = self.transport.send(request).await?;
        Ok(response.body)
    }
}

/// Serializes a request body, reporting failures as [`ApiError::Encoding`].
pub(crate) fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(ApiError::Encoding)
}

impl fmt::Debug for WpcomClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WpcomClient").finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! An in-memory transport that records requests and replays canned outcomes.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::api::transport::TransportResponse;

    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: Mutex<Vec<TransportRequest>>,
        outcomes: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    }

    impl RecordingTransport {
        pub fn replying(body: Value) -> Arc<Self> {
            let transport = Self::default();
            transport
                .outcomes
                .lock()
                .unwrap()
                .push_back(Ok(TransportResponse::ok(body)));
            Arc::new(transport)
        }

        pub fn failing(error: TransportError) -> Arc<Self> {
            let transport = Self::default();
            transport.outcomes.lock().unwrap().push_back(Err(error));
            Arc::new(transport)
        }

        pub fn client(self: &Arc<Self>) -> WpcomClient {
            WpcomClient::from_shared(self.clone())
        }

        pub fn last_request(&self) -> TransportRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request was sent")
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn send(
            &self,
            request: TransportRequest,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push(request);
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .expect("no canned outcome left")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::api::transport::HttpMethod;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_passes_body_through() {
        let transport = RecordingTransport::replying(json!({"ok": true}));
        let body = transport.client().get(ApiVersion::V2, "sites/3/scan").await.unwrap();
        assert_eq!(body, json!({"ok": true}));

        let request = transport.last_request();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.path, "wpcom/v2/sites/3/scan");
        assert!(request.body.is_none());
    }

    #[tokio::test]
    async fn test_transport_error_is_forwarded() {
        let transport = RecordingTransport::failing(TransportError::Http {
            status: 500,
            code: None,
            message: "boom".to_string(),
        });
        let err = transport
            .client()
            .post(ApiVersion::V1_1, "sites/new", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Transport(TransportError::Http { status: 500, ref message, .. })
                if message == "boom"
        ));
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn test_unserializable_body_is_an_encoding_error() {
        let mut body = std::collections::BTreeMap::new();
        body.insert((1u8, 2u8), 3u8);

        let err = encode(&body).unwrap_err();
        assert!(matches!(err, ApiError::Encoding(_)));
        assert_eq!(err.status(), None);
        assert!(!err.is_auth_error());

        assert_eq!(encode(&json!({"ignore": true})).unwrap(), json!({"ignore": true}));
    }

    #[test]
    fn test_from_config() {
        let config = ApiConfig::default();
        assert!(WpcomClient::from_config(&config, None).is_ok());

        let broken = ApiConfig {
            base_url: "::".to_string(),
            ..ApiConfig::default()
        };
        assert!(WpcomClient::from_config(&broken, None).is_err());
    }
}
