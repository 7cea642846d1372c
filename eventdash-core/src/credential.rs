//! Bearer credentials and their on-disk store.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::config_dir;
use crate::error::{EventError, EventResult};

/// A bearer token for the events API.
///
/// Passed explicitly into every fetch. An empty token is treated the same
/// as no token at all.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token, rejecting empty or whitespace-only strings.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let token = token.trim();
        if token.is_empty() {
            None
        } else {
            Some(Credential(token.to_string()))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Keep tokens out of logs.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Persisted credentials file, `credentials.toml` under the config dir.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CredentialFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl CredentialFile {
    pub fn default_path() -> EventResult<PathBuf> {
        Ok(config_dir()?.join("credentials.toml"))
    }

    pub fn load(path: &Path) -> EventResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| EventError::Config(e.to_string()))
    }

    pub fn save(&self, path: &Path) -> EventResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| EventError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn credential(&self) -> Option<Credential> {
        self.token.clone().and_then(Credential::new)
    }

    /// Store `token`, replacing any previous one.
    pub fn store(path: &Path, token: &str) -> EventResult<Credential> {
        let credential = Credential::new(token)
            .ok_or_else(|| EventError::Config("Refusing to store an empty token".into()))?;
        CredentialFile {
            token: Some(credential.token().to_string()),
        }
        .save(path)?;
        Ok(credential)
    }

    /// Remove the stored token. Returns whether there was one.
    pub fn clear(path: &Path) -> EventResult<bool> {
        if !path.exists() {
            return Ok(false);
        }
        let had_token = Self::load(path)?.credential().is_some();
        std::fs::remove_file(path)?;
        Ok(had_token)
    }
}

/// Pick the first usable token from an explicit flag, the environment and
/// the credentials file, in that order.
pub fn resolve_credential(
    flag: Option<&str>,
    env: Option<&str>,
    file: &CredentialFile,
) -> Option<Credential> {
    flag.and_then(Credential::new)
        .or_else(|| env.and_then(Credential::new))
        .or_else(|| file.credential())
}
