//
//  wpcom-kit
//  cli/site.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Site creation commands.
//!
//! Creation is signed with the OAuth application's client ID and secret
//! from the `[oauth]` config section. A stored user credential is sent
//! when present so the new site belongs to that account.

use anyhow::{anyhow, bail, Result};
use clap::{Args, Subcommand};

use crate::api::site::{SiteCreationRequest, SiteCreationResponse};
use crate::config::Config;
use crate::output::{format_bool, print_field, print_header, TableOutput};
use crate::util::slugify;

use super::{optional_client, GlobalOptions};

/// Create WordPress.com sites.
#[derive(Args, Debug)]
pub struct SiteCommand {
    #[command(subcommand)]
    pub command: SiteSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum SiteSubcommand {
    /// Create a new site
    Create(CreateArgs),
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Site title
    #[arg(long, short = 't')]
    pub title: String,

    /// Requested address, e.g. `fieldnotes` (defaults to the slugified title)
    #[arg(long, short = 'a')]
    pub address: Option<String>,

    /// Site tagline
    #[arg(long)]
    pub tagline: Option<String>,

    /// Site segment ID
    #[arg(long, default_value = "1")]
    pub segment: i64,

    /// Site vertical ID
    #[arg(long)]
    pub vertical: Option<String>,

    /// Language ID (defaults to `defaults.language_id`, then `en`)
    #[arg(long, short = 'l')]
    pub language: Option<String>,

    /// Create the site as private
    #[arg(long)]
    pub private: bool,

    /// Only validate the request, create nothing
    #[arg(long)]
    pub validate: bool,

    /// IANA timezone, e.g. `Europe/London`
    #[arg(long)]
    pub timezone: Option<String>,

    /// Starter design slug
    #[arg(long)]
    pub design: Option<String>,

    /// Onboarding flow name to record
    #[arg(long)]
    pub flow: Option<String>,

    /// Let the server pick a free address if the requested one is taken
    #[arg(long)]
    pub find_available_url: bool,
}

impl TableOutput for SiteCreationResponse {
    fn print_table(&self, color: bool) {
        print_header(&self.created_site.title);
        print_field("ID", &self.created_site.id.to_string(), color);
        print_field("URL", &self.created_site.url, color);
        print_field("XML-RPC", &self.created_site.xmlrpc, color);
        print_field("Success", &format_bool(self.success, color), color);
    }
}

/// Builds the request from arguments and configuration.
fn build_request(args: &CreateArgs, config: &Config) -> Result<SiteCreationRequest> {
    let client_id = config.oauth.client_id.clone().ok_or_else(|| {
        anyhow!("Missing oauth.client_id. Run 'wpk config set oauth.client_id <ID>'.")
    })?;
    let client_secret = config.oauth.client_secret.clone().ok_or_else(|| {
        anyhow!("Missing oauth.client_secret. Run 'wpk config set oauth.client_secret <SECRET>'.")
    })?;

    let site_url = match &args.address {
        Some(address) => address.clone(),
        None => slugify(&args.title).replace('-', ""),
    };
    if site_url.is_empty() {
        bail!("Could not derive a site address from the title. Pass --address.");
    }

    let language_id = args
        .language
        .clone()
        .or_else(|| config.defaults.language_id.clone())
        .unwrap_or_else(|| "en".to_string());

    Ok(SiteCreationRequest {
        segment_id: args.segment,
        vertical_id: args.vertical.clone(),
        title: args.title.clone(),
        tagline: args.tagline.clone(),
        site_url,
        is_public: !args.private,
        language_id,
        should_validate: args.validate,
        client_id,
        client_secret,
        timezone: args.timezone.clone(),
        site_design: args.design.clone(),
        creation_flow: args.flow.clone(),
        find_available_url: args.find_available_url,
    })
}

impl SiteCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            SiteSubcommand::Create(args) => self.create(args, global).await,
        }
    }

    async fn create(&self, args: &CreateArgs, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let request = build_request(args, &config)?;
        let client = optional_client(&config)?;

        tracing::debug!(
            site_url = %request.site_url,
            validate = request.should_validate,
            "creating site"
        );
        let response = client.create_site(&request).await?;

        let writer = global.writer();
        writer.write(&response)?;
        if !response.success {
            writer.write_warning("The server did not report success; the site may not exist yet");
        } else if request.should_validate {
            writer.write_success("Request validated");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CreateArgs,
    }

    fn args(extra: &[&str]) -> CreateArgs {
        let mut argv = vec!["site-create", "--title", "Field Notes"];
        argv.extend_from_slice(extra);
        Harness::parse_from(argv).args
    }

    fn config() -> Config {
        let mut config = Config::default();
        config.oauth.client_id = Some("11".to_string());
        config.oauth.client_secret = Some("shh".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let request = build_request(&args(&[]), &config()).unwrap();
        assert_eq!(request.site_url, "fieldnotes");
        assert_eq!(request.language_id, "en");
        assert_eq!(request.segment_id, 1);
        assert!(request.is_public);
        assert!(request.tagline.is_none());
    }

    #[test]
    fn test_flags_map_onto_request() {
        let request = build_request(
            &args(&["--address", "notes", "--private", "--tagline", "Dispatches", "--validate"]),
            &config(),
        )
        .unwrap();
        assert_eq!(request.site_url, "notes");
        assert!(!request.is_public);
        assert!(request.should_validate);
        assert_eq!(request.tagline.as_deref(), Some("Dispatches"));
    }

    #[test]
    fn test_language_falls_back_to_config() {
        let mut config = config();
        config.defaults.language_id = Some("fr".to_string());
        assert_eq!(build_request(&args(&[]), &config).unwrap().language_id, "fr");
    }

    #[test]
    fn test_missing_client_credentials() {
        assert!(build_request(&args(&[]), &Config::default()).is_err());
    }
}
