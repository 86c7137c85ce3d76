//
//  wpcom-kit
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Credentials for the WordPress.com REST API.
//!
//! ## Supported Authentication Methods
//!
//! - **OAuth 2.0 bearer token**: What the WordPress.com apps use. Obtaining the
//!   token is out of scope; paste one into `wpk auth login`.
//! - **Application password**: Username plus an application password, sent as
//!   HTTP Basic authentication.
//!
//! ## Module Structure
//!
//! - [`keyring`](KeyringStore): Secure storage in the system keyring
//! - [`token`](resolve_credential): Token input, validation, and lookup
//!
//! ## Example
//!
//! ```rust
//! use wpcom_kit::auth::AuthCredential;
//!
//! let credential = AuthCredential::bearer("abc123");
//! let stored = credential.to_stored().unwrap();
//! assert_eq!(AuthCredential::from_stored(&stored), credential);
//! ```

mod keyring;
mod token;

pub use keyring::*;
pub use token::*;

use reqwest::RequestBuilder;
use serde::{Deserialize, Serialize};

/// Credentials attached to every API request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthCredential {
    /// OAuth 2.0 access token, sent as `Authorization: Bearer`.
    OAuth {
        access_token: String,
    },
    /// Application password, sent as HTTP Basic authentication.
    ApplicationPassword {
        username: String,
        password: String,
    },
}

impl AuthCredential {
    /// Shorthand for an OAuth bearer token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::OAuth {
            access_token: token.into(),
        }
    }

    /// Adds the matching `Authorization` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::OAuth { access_token } => request.bearer_auth(access_token),
            Self::ApplicationPassword { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    /// Serializes the credential for the keyring.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Reads a credential back from the keyring.
    ///
    /// Anything that is not a serialized credential is taken as a bare
    /// bearer token.
    pub fn from_stored(stored: &str) -> Self {
        serde_json::from_str(stored).unwrap_or_else(|_| Self::bearer(stored.trim()))
    }

    /// The secret part, for masked display.
    pub fn secret(&self) -> &str {
        match self {
            Self::OAuth { access_token } => access_token,
            Self::ApplicationPassword { password, .. } => password,
        }
    }

    /// Short label for status output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OAuth { .. } => "OAuth token",
            Self::ApplicationPassword { .. } => "Application password",
        }
    }
}
