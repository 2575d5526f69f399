//! Transaction synchronization capability

use async_trait::async_trait;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("failed to launch sync tool: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("sync tool exited with {0}")]
    Failed(ExitStatus),
}

/// Narrow interface over the external sync tool. The production
/// implementation shells out to the unfold binary; tests substitute a fake
/// runner so no process is ever spawned.
///
/// All failure causes (expired token, network, aggregator outage) collapse
/// into a single error; the tool's exit status is the only signal.
#[async_trait]
pub trait SyncRunner: Send + Sync {
    async fn sync(&self) -> Result<(), SyncError>;
}
