//
//  wpcom-kit
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod auth;
mod backup;
mod config;
mod editor;
mod scan;
mod site;

pub use auth::AuthCommand;
pub use backup::BackupCommand;
pub use config::ConfigCommand;
pub use editor::EditorCommand;
pub use scan::ScanCommand;
pub use site::SiteCommand;

use anyhow::Result;
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiError, TransportError, WpcomClient};
use crate::auth::{resolve_credential, KeyringStore};
use crate::config::Config;
use crate::exit_codes;
use crate::output::{OutputFormat, OutputWriter};

#[derive(Parser, Debug)]
#[command(
    name = "wpk",
    version,
    about = "Work with WordPress.com and Jetpack sites from the command line",
    long_about = "wpk talks to the WordPress.com REST API.\n\n\
                  It prepares Jetpack backup downloads, reviews Jetpack Scan threats, \
                  switches editors, and creates sites.",
    propagate_version = true,
    after_help = "Use 'wpk <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Site ID to operate on (defaults to `defaults.site_id`)
    #[arg(long, short = 's', global = true, env = "WPK_SITE")]
    pub site: Option<u64>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage stored credentials
    #[command(visible_alias = "login")]
    Auth(AuthCommand),

    /// Prepare and download Jetpack backups
    Backup(BackupCommand),

    /// Review Jetpack Scan results
    Scan(ScanCommand),

    /// Show or change the editor a site uses
    Editor(EditorCommand),

    /// Create WordPress.com sites
    Site(SiteCommand),

    /// Read and write configuration
    Config(ConfigCommand),

    /// Print the version
    Version,
}

/// Raised when a command needs credentials and none are available.
#[derive(Error, Debug)]
#[error("Not authenticated with {host}. Run 'wpk auth login' or set WPK_TOKEN.")]
pub struct AuthRequired {
    pub host: String,
}

impl GlobalOptions {
    pub(crate) fn writer(&self) -> OutputWriter {
        OutputWriter::new(OutputFormat::from_json_flag(self.json))
    }

    /// The `--site` flag, falling back to the configured default.
    pub(crate) fn site_id(&self, config: &Config) -> Result<u64> {
        self.site.or(config.defaults.site_id).ok_or_else(|| {
            anyhow::anyhow!(
                "No site specified. Pass --site or run 'wpk config set defaults.site_id <ID>'."
            )
        })
    }
}

/// Builds a client that must carry credentials.
pub(crate) fn authenticated_client(config: &Config) -> Result<WpcomClient> {
    let (credential, source) = resolve_credential(&config.api.base_url, &KeyringStore::new())?
        .ok_or_else(|| AuthRequired {
            host: config.api.base_url.clone(),
        })?;
    tracing::debug!(%source, "using stored credential");
    Ok(WpcomClient::from_config(&config.api, Some(credential))?)
}

/// Builds a client that sends credentials only if some are available.
pub(crate) fn optional_client(config: &Config) -> Result<WpcomClient> {
    let credential = resolve_credential(&config.api.base_url, &KeyringStore::new())?
        .map(|(credential, _)| credential);
    Ok(WpcomClient::from_config(&config.api, credential)?)
}

/// Maps a command failure to a process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.downcast_ref::<AuthRequired>().is_some() {
        return exit_codes::AUTH_ERROR;
    }
    let Some(api_error) = err.downcast_ref::<ApiError>() else {
        return exit_codes::ERROR;
    };
    if api_error.is_auth_error() {
        return exit_codes::AUTH_ERROR;
    }
    if api_error.is_not_found() {
        return exit_codes::NOT_FOUND;
    }
    match api_error {
        ApiError::Transport(TransportError::Network(_)) => exit_codes::SERVICE_ERROR,
        _ if api_error.status().is_some_and(|status| status >= 500) => exit_codes::SERVICE_ERROR,
        _ => exit_codes::ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_site_falls_back_to_config() {
        let mut config = Config::default();
        let global = GlobalOptions::default();
        assert!(global.site_id(&config).is_err());

        config.defaults.site_id = Some(7);
        assert_eq!(global.site_id(&config).unwrap(), 7);

        let global = GlobalOptions {
            site: Some(9),
            ..GlobalOptions::default()
        };
        assert_eq!(global.site_id(&config).unwrap(), 9);
    }

    #[test]
    fn test_exit_codes() {
        let http = |status| {
            anyhow::Error::from(ApiError::Transport(TransportError::Http {
                status,
                code: None,
                message: String::new(),
            }))
        };
        assert_eq!(exit_code(&http(401)), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code(&http(404)), exit_codes::NOT_FOUND);
        assert_eq!(exit_code(&http(503)), exit_codes::SERVICE_ERROR);
        assert_eq!(exit_code(&http(400)), exit_codes::ERROR);

        let unauthenticated = anyhow::Error::from(AuthRequired {
            host: "public-api.wordpress.com".to_string(),
        });
        assert_eq!(exit_code(&unauthenticated), exit_codes::AUTH_ERROR);
        assert_eq!(exit_code(&anyhow::anyhow!("other")), exit_codes::ERROR);
    }

    #[test]
    fn test_parses_nested_commands() {
        let cli = Cli::try_parse_from(["wpk", "--site", "12", "scan", "threats", "--all"]).unwrap();
        assert_eq!(cli.global.site, Some(12));
        assert!(matches!(cli.command, Commands::Scan(_)));
    }
}
