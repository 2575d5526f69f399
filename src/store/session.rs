//! Fold session credentials
//!
//! The session file doubles as the sync tool's configuration, so the layout
//! (`token.access`, `token.refresh`, `fold_user.uuid`, `device_hash`) is
//! fixed by that tool.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionFile {
    pub token: TokenPair,
    pub fold_user: FoldUser,
    pub device_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FoldUser {
    pub uuid: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session file does not exist")]
    NotFound,
    #[error("failed to read session file: {0}")]
    Io(#[from] std::io::Error),
    #[error("session file is malformed: {0}")]
    Parse(#[from] serde_yaml::Error),
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SessionStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persists a fresh token record. Every save gets a new device hash; the
    /// value is opaque and only needs to be unique per session.
    pub fn save(&self, access: &str, refresh: &str, user_uuid: &str) -> Result<()> {
        let session = SessionFile {
            token: TokenPair {
                access: access.to_string(),
                refresh: refresh.to_string(),
            },
            fold_user: FoldUser {
                uuid: user_uuid.to_string(),
            },
            device_hash: format!("fundfold-{:08x}", rand::random::<u32>()),
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let raw = serde_yaml::to_string(&session).context("Failed to serialize session")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write session to {}", self.path.display()))
    }

    pub fn read(&self) -> Result<SessionFile, SessionError> {
        if !self.path.exists() {
            return Err(SessionError::NotFound);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }

    /// Fail-open read of the stored access token. A missing or unreadable
    /// session means no token.
    pub fn access_token(&self) -> Option<String> {
        match self.read() {
            Ok(session) => Some(session.token.access),
            Err(SessionError::NotFound) => None,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Ignoring unreadable session file"
                );
                None
            }
        }
    }

    /// Validity is presence-only; there is no expiry tracking.
    pub fn is_logged_in(&self) -> bool {
        self.access_token().is_some()
    }
}
