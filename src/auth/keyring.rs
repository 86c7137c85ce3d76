//
//  wpcom-kit
//  auth/keyring.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Secure Credential Storage
//!
//! Credentials live in the platform keyring:
//!
//! - **macOS**: Keychain Services
//! - **Linux**: Secret Service API (GNOME Keyring, KWallet)
//! - **Windows**: Windows Credential Manager
//!
//! Entries use the service name `wpcom-kit` and are keyed by API host, so a
//! staging base URL and production never share a token.
//!
//! ```rust,no_run
//! use wpcom_kit::auth::{AuthCredential, KeyringStore};
//!
//! fn remember() -> anyhow::Result<()> {
//!     let store = KeyringStore::new();
//!     store.store_credential("public-api.wordpress.com", &AuthCredential::bearer("token"))?;
//!     assert!(store.get_credential("public-api.wordpress.com")?.is_some());
//!     store.delete("public-api.wordpress.com")?;
//!     Ok(())
//! }
//! ```

use anyhow::{Context, Result};
use keyring::Entry;

use super::AuthCredential;

const SERVICE_NAME: &str = "wpcom-kit";

/// Keyring-backed credential store.
#[derive(Debug, Clone)]
pub struct KeyringStore {
    service: String,
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    /// Stores a raw secret for `host`, replacing any previous one.
    pub fn store(&self, host: &str, secret: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        entry
            .set_password(secret)
            .with_context(|| format!("Failed to write keyring entry for {}", host))?;
        Ok(())
    }

    /// Returns the raw secret for `host`, or `None` if nothing is stored.
    pub fn get(&self, host: &str) -> Result<Option<String>> {
        let entry = Entry::new(&self.service, host)?;
        match entry.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read keyring entry for {}", host)),
        }
    }

    /// Removes the entry for `host`. Missing entries are not an error.
    pub fn delete(&self, host: &str) -> Result<()> {
        let entry = Entry::new(&self.service, host)?;
        match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to delete keyring entry for {}", host))
            }
        }
    }

    pub fn store_credential(&self, host: &str, credential: &AuthCredential) -> Result<()> {
        let stored = credential
            .to_stored()
            .context("Failed to serialize credential")?;
        self.store(host, &stored)
    }

    pub fn get_credential(&self, host: &str) -> Result<Option<AuthCredential>> {
        Ok(self.get(host)?.map(|stored| AuthCredential::from_stored(&stored)))
    }
}
