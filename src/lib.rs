//
//  wpcom-kit
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # WordPress.com Client Library
//!
//! Typed access to the WordPress.com and Jetpack REST APIs, plus the `wpk`
//! command-line tool built on it.
//!
//! ## Features
//!
//! - **Jetpack Backup**: Prepare downloadable backups and track their progress
//! - **Jetpack Scan**: Read scanner state and threats, including highlighted source context
//! - **Editor Settings**: Choose between the block editor and Aztec per site or account-wide
//! - **Site Creation**: Create WordPress.com sites
//! - **Pluggable Transport**: Every request goes through the [`api::Transport`] trait
//!
//! ## Module Structure
//!
//! - [`api`]: Client, transport, and resource models
//! - [`auth`]: Credentials and keyring storage
//! - [`config`]: Configuration file management
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Table and JSON output
//! - [`util`]: Formatting helpers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use wpcom_kit::api::WpcomClient;
//! use wpcom_kit::auth::AuthCredential;
//! use wpcom_kit::Config;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = Config::load()?;
//! let client = WpcomClient::from_config(&config.api, Some(AuthCredential::bearer("token")))?;
//!
//! let backup = client.prepare_backup(12345, None, None).await?;
//! println!("download {} is {:?}", backup.download_id, backup.status());
//! # Ok(())
//! # }
//! ```

/// Command-line interface definitions.
pub mod cli;

/// API client, transport, and resource models.
pub mod api;

/// Credentials and secure storage.
pub mod auth;

/// Configuration file management.
///
/// - Linux: `~/.config/wpk/config.toml`
/// - macOS: `~/Library/Application Support/wpk/config.toml`
/// - Windows: `%APPDATA%\wpk\config\config.toml`
pub mod config;

/// Output formatting for tables and JSON.
pub mod output;

/// Time and string formatting helpers.
pub mod util;

pub use cli::Cli;

pub use config::Config;

/// Name of the CLI binary, also used for the config directory.
pub const APP_NAME: &str = "wpk";

/// Crate version, from Cargo.toml.
///
/// ```rust
/// use wpcom_kit::VERSION;
///
/// println!("wpk version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Not authenticated, or the server rejected the credential (401/403).
    ///
    /// Run `wpk auth login` to authenticate.
    pub const AUTH_ERROR: i32 = 4;

    /// The site, download, or threat does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The server responded with a 5xx status or could not be reached.
    pub const SERVICE_ERROR: i32 = 32;
}
