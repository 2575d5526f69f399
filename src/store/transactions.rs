//! Read-only projection of the synced transaction database
//!
//! The database is produced entirely by the external sync tool; this module
//! never writes to it. Reads are best effort and degrade to an empty list,
//! transaction data is supplementary rather than load-bearing.

use crate::core::sync::SyncRunner;
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Rows returned by the transactions endpoint.
pub const RECENT_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub uuid: String,
    pub amount: f64,
    pub current_balance: f64,
    /// Source-defined format, passed through verbatim.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub account: String,
    pub merchant: String,
}

pub struct TransactionLog {
    db_path: PathBuf,
    runner: Arc<dyn SyncRunner>,
}

impl TransactionLog {
    pub fn new(db_path: impl Into<PathBuf>, runner: Arc<dyn SyncRunner>) -> Self {
        TransactionLog {
            db_path: db_path.into(),
            runner,
        }
    }

    /// Returns up to `limit` of the most recent transactions, newest first.
    ///
    /// When the database has never been materialized, one opportunistic sync
    /// is attempted to create it; its failure is ignored. Read errors are
    /// logged and converted to an empty result. This method never fails.
    pub async fn recent(&self, limit: usize) -> Vec<Transaction> {
        if !self.db_path.exists() {
            if let Err(e) = self.runner.sync().await {
                debug!(error = %e, "Opportunistic sync failed, may not be logged in");
            }
            if !self.db_path.exists() {
                return Vec::new();
            }
        }

        match self.read_rows(limit) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(
                    error = %e,
                    db = %self.db_path.display(),
                    "Failed to read transactions"
                );
                Vec::new()
            }
        }
    }

    fn read_rows(&self, limit: usize) -> Result<Vec<Transaction>> {
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open {}", self.db_path.display()))?;

        let table_exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'transactions'",
            [],
            |row| row.get(0),
        )?;
        if table_exists == 0 {
            debug!("Database has no transactions table yet");
            return Ok(Vec::new());
        }

        let mut stmt = conn.prepare(
            "SELECT uuid, amount, current_balance, timestamp, type, account, merchant \
             FROM transactions ORDER BY timestamp DESC LIMIT ?1",
        )?;
        let rows = stmt
            .query_map([limit as i64], |row| {
                Ok(Transaction {
                    uuid: row.get(0)?,
                    amount: row.get(1)?,
                    current_balance: row.get(2)?,
                    timestamp: row.get(3)?,
                    kind: row.get(4)?,
                    account: row.get(5)?,
                    merchant: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
