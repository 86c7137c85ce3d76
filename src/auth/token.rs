//
//  wpcom-kit
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Token input and lookup.
//!
//! Credentials are resolved in this order:
//!
//! 1. The `WPK_TOKEN` environment variable, taken as a bearer token
//! 2. The keyring entry for the API host
//!
//! The first one found wins.

use std::fmt;

use anyhow::{Context, Result};
use url::Url;

use super::{AuthCredential, KeyringStore};

/// Environment variable that overrides the stored credential.
pub const TOKEN_ENV_VAR: &str = "WPK_TOKEN";

/// Where a resolved credential came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    Keyring,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "{} environment variable", TOKEN_ENV_VAR),
            Self::Keyring => write!(f, "system keyring"),
        }
    }
}

/// Reads a single line from standard input and trims it.
pub fn read_token_from_stdin() -> Result<String> {
    use std::io::{self, BufRead};

    let stdin = io::stdin();
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("Failed to read token from standard input")?;

    Ok(line.trim().to_string())
}

/// Basic shape check: non-empty and no whitespace.
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// Masks a secret for display, keeping the first and last four characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// Keyring key for an API base URL: its host, plus the port when explicit.
pub fn host_key(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url).with_context(|| format!("Invalid API base URL: {}", base_url))?;
    let host = url
        .host_str()
        .with_context(|| format!("API base URL has no host: {}", base_url))?;
    Ok(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

/// Looks up the credential for `base_url`, environment first.
pub fn resolve_credential(
    base_url: &str,
    store: &KeyringStore,
) -> Result<Option<(AuthCredential, CredentialSource)>> {
    if let Some(credential) = credential_from_env(std::env::var(TOKEN_ENV_VAR).ok()) {
        return Ok(Some((credential, CredentialSource::Environment)));
    }

    let host = host_key(base_url)?;
    Ok(store
        .get_credential(&host)?
        .map(|credential| (credential, CredentialSource::Keyring)))
}

fn credential_from_env(value: Option<String>) -> Option<AuthCredential> {
    value
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .map(AuthCredential::bearer)
}
