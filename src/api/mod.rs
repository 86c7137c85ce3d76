//
//  wpcom-kit
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed bindings for the WordPress.com and Jetpack REST endpoints.
//!
//! ## Architecture
//!
//! - [`transport`]: The [`Transport`] seam and its reqwest-backed implementation
//! - [`client`]: [`WpcomClient`], which composes paths and decodes bodies
//! - [`common`]: Shared errors and decoding helpers
//! - [`backup`], [`scan`], [`editor`], [`site`]: One module per resource
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wpcom_kit::api::WpcomClient;
//! use wpcom_kit::auth::AuthCredential;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = WpcomClient::wordpress_com(AuthCredential::bearer("your-token"))?;
//! let scan = client.scan(12345).await?;
//! println!("{} active threats", scan.active_threats().count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]:
//!
//! - `Encoding`: the request body could not be serialized
//! - `Decoding`: the response did not have the expected shape
//! - `Transport`: anything the [`Transport`] reported, passed through unchanged

/// Backup download preparation and status.
pub mod backup;

/// Core client that composes endpoints and decodes responses.
pub mod client;

/// Errors and decoding helpers shared by every resource module.
pub mod common;

/// Editor settings for a site or for all of the user's sites.
pub mod editor;

/// Jetpack Scan state and threats.
pub mod scan;

/// Site creation.
pub mod site;

/// HTTP transport abstraction.
pub mod transport;

pub use client::WpcomClient;
pub use common::{ApiError, DecodingError};
pub use transport::{
    ApiVersion, HttpMethod, HttpTransport, Transport, TransportError, TransportRequest,
    TransportResponse,
};
