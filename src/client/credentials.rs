//! Twitter API tokens read from a `KEY=VALUE` file

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{WarbotError, WarbotResult};

pub const CONSUMER_KEY: &str = "CONSUMER_KEY";
pub const CONSUMER_SECRET: &str = "CONSUMER_SECRET";
pub const ACCESS_KEY: &str = "ACCESS_KEY";
pub const ACCESS_SECRET: &str = "ACCESS_SECRET";

/// Tokens found in the credential file. Any of them may be missing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub consumer_key: Option<String>,
    pub consumer_secret: Option<String>,
    pub access_key: Option<String>,
    pub access_secret: Option<String>,
}

/// A complete set of OAuth 1.0a keys
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthKeys {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_key: String,
    pub access_secret: String,
}

impl Credentials {
    /// Parse `KEY=VALUE` lines.
    ///
    /// A line must split on `=` into exactly two parts with a non-empty
    /// value; anything else is skipped, as are unknown keys.
    pub fn parse(content: &str) -> Self {
        let mut creds = Self::default();

        for line in content.lines() {
            let line = line.trim();
            let parts: Vec<&str> = line.split('=').collect();
            if parts.len() != 2 {
                continue;
            }

            let (key, value) = (parts[0].trim(), parts[1].trim());
            if value.is_empty() {
                continue;
            }

            let slot = match key {
                CONSUMER_KEY => &mut creds.consumer_key,
                CONSUMER_SECRET => &mut creds.consumer_secret,
                ACCESS_KEY => &mut creds.access_key,
                ACCESS_SECRET => &mut creds.access_secret,
                _ => continue,
            };
            *slot = Some(value.to_string());
        }

        creds
    }

    /// Read a credential file, returning an error if it cannot be read
    pub fn load(path: impl AsRef<Path>) -> WarbotResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => WarbotError::NotFound { path: path.to_path_buf() },
            _ => WarbotError::Read {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;

        let creds = Self::parse(&content);
        debug!(path = %path.display(), missing = ?creds.missing(), "Credentials loaded");
        Ok(creds)
    }

    /// Read a credential file; failures are logged and yield empty credentials
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            warn!(path = %path.display(), error = %e, "Could not read credentials");
            Self::default()
        })
    }

    /// Names of the keys that were not found
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (CONSUMER_KEY, &self.consumer_key),
            (CONSUMER_SECRET, &self.consumer_secret),
            (ACCESS_KEY, &self.access_key),
            (ACCESS_SECRET, &self.access_secret),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(k, _)| k)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// All four keys, or a `Credentials` error naming the missing ones
    pub fn oauth_keys(&self) -> WarbotResult<OAuthKeys> {
        match (
            &self.consumer_key,
            &self.consumer_secret,
            &self.access_key,
            &self.access_secret,
        ) {
            (Some(ck), Some(cs), Some(ak), Some(asec)) => Ok(OAuthKeys {
                consumer_key: ck.clone(),
                consumer_secret: cs.clone(),
                access_key: ak.clone(),
                access_secret: asec.clone(),
            }),
            _ => Err(WarbotError::Credentials {
                message: format!("missing {}", self.missing().join(", ")),
            }),
        }
    }
}

fn redact(value: &Option<String>) -> &'static str {
    if value.is_some() { "<set>" } else { "<missing>" }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &redact(&self.consumer_secret))
            .field("access_key", &self.access_key)
            .field("access_secret", &redact(&self.access_secret))
            .finish()
    }
}

impl fmt::Debug for OAuthKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthKeys")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("access_key", &self.access_key)
            .field("access_secret", &"<redacted>")
            .finish()
    }
}
