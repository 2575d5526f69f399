//! Real sync runner that shells out to the unfold binary

use crate::core::sync::{SyncError, SyncRunner};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

/// Invokes `unfold transactions --db --config <session>` to pull transaction
/// history into the local database. The tool reads the stored token
/// configuration itself; exit status is the only result surfaced.
pub struct UnfoldRunner {
    binary: PathBuf,
    session_path: PathBuf,
}

impl UnfoldRunner {
    pub fn new(binary: impl Into<PathBuf>, session_path: impl Into<PathBuf>) -> Self {
        UnfoldRunner {
            binary: binary.into(),
            session_path: session_path.into(),
        }
    }
}

#[async_trait]
impl SyncRunner for UnfoldRunner {
    async fn sync(&self) -> Result<(), SyncError> {
        debug!(
            "Running {} transactions --db --config {}",
            self.binary.display(),
            self.session_path.display()
        );

        let status = Command::new(&self.binary)
            .arg("transactions")
            .arg("--db")
            .arg("--config")
            .arg(&self.session_path)
            .status()
            .await?;

        if !status.success() {
            return Err(SyncError::Failed(status));
        }
        info!("Transaction sync completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let runner = UnfoldRunner::new("/nonexistent/unfold", "/tmp/unfold_config.yaml");

        let result = runner.sync().await;

        assert!(matches!(result, Err(SyncError::Spawn(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_is_success() {
        // `true` ignores the fixed argument set and exits 0.
        let runner = UnfoldRunner::new("true", "/tmp/unfold_config.yaml");

        assert!(runner.sync().await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let runner = UnfoldRunner::new("false", "/tmp/unfold_config.yaml");

        let result = runner.sync().await;

        assert!(matches!(result, Err(SyncError::Failed(_))));
    }
}
