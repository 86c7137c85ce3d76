//
//  wpcom-kit
//  cli/auth.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Authentication commands.
//!
//! Credentials are stored in the system keyring under the host of
//! `api.base_url`, so pointing the config at another API keeps its own token.

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use serde_json::json;

use crate::auth::{
    host_key, mask_token, read_token_from_stdin, resolve_credential, validate_token,
    AuthCredential, KeyringStore,
};
use crate::config::Config;

use super::GlobalOptions;

/// Manage stored credentials.
#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Store a credential read from standard input
    Login(LoginArgs),

    /// Remove the stored credential
    Logout,

    /// Show which credential would be used
    Status(StatusArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Store an application password for this user instead of an OAuth token
    #[arg(long, short = 'u')]
    pub username: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show the credential (masked)
    #[arg(long, short = 't')]
    pub show_token: bool,
}

impl AuthCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            AuthSubcommand::Login(args) => login(args, global),
            AuthSubcommand::Logout => logout(global),
            AuthSubcommand::Status(args) => status(args, global),
        }
    }
}

fn login(args: &LoginArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let host = host_key(&config.api.base_url)?;
    let writer = global.writer();

    let credential = match &args.username {
        Some(username) => {
            eprintln!("Paste the application password for {}:", username);
            let password = read_token_from_stdin()?;
            if password.is_empty() {
                bail!("No password provided");
            }
            AuthCredential::ApplicationPassword {
                username: username.clone(),
                password,
            }
        }
        None => {
            eprintln!("Paste your access token:");
            let token = read_token_from_stdin()?;
            if !validate_token(&token) {
                bail!("Invalid token format");
            }
            AuthCredential::bearer(token)
        }
    };

    KeyringStore::new().store_credential(&host, &credential)?;
    tracing::debug!(%host, kind = credential.kind(), "stored credential");

    if writer.is_json() {
        let result = json!({ "host": host, "kind": credential.kind() });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        writer.write_success(&format!("Stored {} for {}", credential.kind(), host));
    }
    Ok(())
}

fn logout(global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let host = host_key(&config.api.base_url)?;

    KeyringStore::new().delete(&host)?;
    global.writer().write_success(&format!("Logged out of {}", host));
    Ok(())
}

fn status(args: &StatusArgs, global: &GlobalOptions) -> Result<()> {
    let config = Config::load()?;
    let host = host_key(&config.api.base_url)?;
    let resolved = resolve_credential(&config.api.base_url, &KeyringStore::new())?;

    if global.json {
        let result = match &resolved {
            Some((credential, source)) => json!({
                "host": host,
                "authenticated": true,
                "kind": credential.kind(),
                "source": source.to_string(),
            }),
            None => json!({ "host": host, "authenticated": false }),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", host);
    match resolved {
        Some((credential, source)) => {
            println!("  Credential: {}", credential.kind());
            if let AuthCredential::ApplicationPassword { username, .. } = &credential {
                println!("  Username:   {}", username);
            }
            println!("  Source:     {}", source);
            if args.show_token {
                println!("  Secret:     {}", mask_token(credential.secret()));
            }
        }
        None => {
            println!("  Not logged in");
            println!();
            println!("Run 'wpk auth login' to authenticate");
        }
    }
    Ok(())
}
