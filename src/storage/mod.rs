// src/storage/mod.rs
pub mod json_ledger;
#[cfg(feature = "dynamodb")]
pub mod dynamo;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::extractors::TransactionRecord;
use crate::utils::error::{AppError, StorageError};

pub use json_ledger::JsonLedger;

pub const ASSET_TYPE: &str = "FUTURES_TX";
pub const RECORD_TYPE: &str = "SUMMARY";

/// One ledger row as stored in the assets table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerItem {
    pub user_id: String,
    pub asset_id: String,
    pub tx_id: String,
    pub asset_type: String,
    pub gsi1pk: String,
    pub gsi1sk: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ticker: String,
    pub contract_month: String,
    pub trade_date: String,
    pub qty: u32,
    #[serde(rename = "grossPL")]
    pub gross_pl: String,
    pub notes: String,
    pub created_at: String,
}

impl LedgerItem {
    /// Builds an item for `record` under `owner` with a fresh identity.
    pub fn new(record: &TransactionRecord, owner: &str, now: DateTime<Utc>) -> Self {
        let tx_id = Uuid::new_v4().to_string();
        let trade_date = record.trade_date.format("%Y-%m-%d").to_string();
        Self {
            user_id: owner.to_string(),
            asset_id: tx_id.clone(),
            gsi1pk: owner.to_string(),
            gsi1sk: format!("{}#{}#{}", ASSET_TYPE, trade_date, tx_id),
            tx_id,
            asset_type: ASSET_TYPE.to_string(),
            record_type: RECORD_TYPE.to_string(),
            ticker: record.ticker.clone(),
            contract_month: record.contract_month.clone(),
            trade_date,
            qty: record.qty,
            gross_pl: record.gross_pl.to_string(),
            notes: String::new(),
            created_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Persistent store for ledger items.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn put_item(&self, item: &LedgerItem) -> Result<(), StorageError>;

    /// Owner of any one existing item, or `None` when the store is empty.
    async fn scan_owner(&self) -> Result<Option<String>, StorageError>;
}

/// Where the owner identity for a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Supplied(String),
    Detected(String),
}

impl Owner {
    pub fn id(&self) -> &str {
        match self {
            Owner::Supplied(id) | Owner::Detected(id) => id,
        }
    }
}

/// Uses the supplied owner, or falls back to the owner of an existing item.
pub async fn resolve_owner(
    supplied: Option<&str>,
    store: &dyn LedgerStore,
    table: &str,
) -> Result<Owner, AppError> {
    if let Some(id) = supplied.filter(|id| !id.trim().is_empty()) {
        return Ok(Owner::Supplied(id.to_string()));
    }

    match store.scan_owner().await? {
        Some(id) => {
            tracing::info!("Auto-detected owner {} from table {}", id, table);
            Ok(Owner::Detected(id))
        }
        None => {
            tracing::error!("Table {} has no items to take an owner from", table);
            Err(AppError::OwnerUnresolved(table.to_string()))
        }
    }
}

/// Persists normalized records one at a time.
pub struct LedgerWriter<'a> {
    store: &'a dyn LedgerStore,
}

impl<'a> LedgerWriter<'a> {
    pub fn new(store: &'a dyn LedgerStore) -> Self {
        Self { store }
    }

    pub async fn write(
        &self,
        record: &TransactionRecord,
        owner: &str,
    ) -> Result<LedgerItem, StorageError> {
        let item = LedgerItem::new(record, owner, Utc::now());
        self.store.put_item(&item).await?;
        tracing::debug!("Wrote {} {} {} as {}", item.trade_date, item.ticker, item.contract_month, item.tx_id);
        Ok(item)
    }

    /// Writes every record in order and stops at the first failure.
    pub async fn write_all(
        &self,
        records: &[TransactionRecord],
        owner: &str,
    ) -> Result<usize, AppError> {
        for (written, record) in records.iter().enumerate() {
            if let Err(source) = self.write(record, owner).await {
                tracing::error!("Write failed after {} items: {}", written, source);
                return Err(AppError::Write { written, source });
            }
        }
        Ok(records.len())
    }
}
