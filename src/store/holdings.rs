//! Flat file of mutual fund holdings

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub scheme_code: String,
    pub units: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum HoldingsError {
    #[error("holdings file does not exist")]
    NotFound,
    #[error("failed to read holdings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("holdings file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

pub struct HoldingsStore {
    path: PathBuf,
}

impl HoldingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HoldingsStore { path: path.into() }
    }

    /// Reads the persisted holdings, distinguishing a missing file from an
    /// unreadable one.
    pub fn read(&self) -> Result<Vec<Holding>, HoldingsError> {
        if !self.path.exists() {
            return Err(HoldingsError::NotFound);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Fail-open read: a missing or unreadable holdings file degrades to an
    /// empty list.
    pub fn load(&self) -> Vec<Holding> {
        match self.read() {
            Ok(holdings) => holdings,
            Err(HoldingsError::NotFound) => Vec::new(),
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.path.display(),
                    "Ignoring unreadable holdings file"
                );
                Vec::new()
            }
        }
    }

    /// Replaces the entire persisted collection. No merge, no dedup, no
    /// validation of units.
    pub fn save(&self, holdings: &[Holding]) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let raw = serde_json::to_string(holdings).context("Failed to serialize holdings")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write holdings to {}", self.path.display()))
    }
}
