//
//  wpcom-kit
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared error handling for every service method. A call can fail in exactly
//! three ways, and [`ApiError`] keeps them apart so callers can tell a local
//! bug from a server problem:
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | `Encoding` | The request value could not be serialized |
//! | `Decoding` | The server answered, but not in the expected shape |
//! | `Transport` | The call itself failed (network, HTTP status, bad JSON) |
//!
//! Optional sub-structures that fail to parse are not errors at all; they are
//! dropped and the enclosing value still decodes (see [`decode`]).
//!
//! # Example
//!
//! ```rust
//! use wpcom_kit::api::common::ApiError;
//! use wpcom_kit::api::TransportError;
//!
//! fn describe(result: Result<(), ApiError>) -> &'static str {
//!     match result {
//!         Ok(()) => "ok",
//!         Err(ApiError::Transport(TransportError::Http { status: 401, .. })) => "log in again",
//!         Err(ApiError::Decoding(_)) => "unexpected response",
//!         Err(_) => "failed",
//!     }
//! }
//! # assert_eq!(describe(Ok(())), "ok");
//! ```

use thiserror::Error;

pub mod decode;

pub use decode::DecodingError;

use super::transport::TransportError;

/// Unified error type for all service methods.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The outbound request value could not be serialized to JSON.
    #[error("Failed to encode request: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The response body did not match the expected shape.
    #[error(transparent)]
    Decoding(#[from] DecodingError),

    /// The transport failed; the error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ApiError {
    /// Returns the HTTP status code behind this error, if there is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Returns `true` for 401/403 responses.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_passthrough() {
        let err = ApiError::from(TransportError::Http {
            status: 403,
            code: Some("unauthorized".to_string()),
            message: "nope".to_string(),
        });
        assert_eq!(err.status(), Some(403));
        assert!(err.is_auth_error());
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 403: nope");
    }

    #[test]
    fn test_decoding_has_no_status() {
        let err = ApiError::from(DecodingError::new("blog_details", "missing field `url`"));
        assert_eq!(err.status(), None);
        assert_eq!(
            err.to_string(),
            "Failed to decode `blog_details`: missing field `url`"
        );
    }
}
