// src/storage/json_ledger.rs
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::io::AsyncWriteExt;

use crate::storage::{LedgerItem, LedgerStore};
use crate::utils::error::StorageError;

/// Local ledger: one JSON object per line in `<ledger_dir>/<table>.jsonl`.
pub struct JsonLedger {
    path: PathBuf,
}

#[derive(Deserialize)]
struct OwnerProjection {
    #[serde(rename = "userId")]
    user_id: String,
}

impl JsonLedger {
    /// Ledger for `table` under `ledger_dir`. Nothing touches the disk until
    /// the first `put_item`, which creates the directory if it doesn't exist.
    pub fn new<P: AsRef<Path>>(ledger_dir: P, table: &str) -> Self {
        Self {
            path: ledger_dir.as_ref().join(format!("{}.jsonl", table)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_contents(&self) -> Result<Option<String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::IoError(e)),
        }
    }
}

#[async_trait]
impl LedgerStore for JsonLedger {
    async fn put_item(&self, item: &LedgerItem) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(item)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;
        line.push('\n');

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                tokio::fs::create_dir_all(dir).await.map_err(StorageError::IoError)?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::trace!("Appended {} to {}", item.tx_id, self.path.display());
        Ok(())
    }

    async fn scan_owner(&self) -> Result<Option<String>, StorageError> {
        let contents = match self.read_contents().await? {
            Some(contents) => contents,
            None => return Ok(None),
        };

        let first = contents
            .lines()
            .enumerate()
            .find(|(_, line)| !line.trim().is_empty());

        match first {
            Some((idx, line)) => {
                let projection: OwnerProjection =
                    serde_json::from_str(line).map_err(|e| StorageError::CorruptEntry {
                        line: idx + 1,
                        reason: e.to_string(),
                    })?;
                Ok(Some(projection.user_id))
            }
            None => Ok(None),
        }
    }
}
