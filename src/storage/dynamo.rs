// src/storage/dynamo.rs
use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::config::StoreConfig;
use crate::storage::{LedgerItem, LedgerStore};
use crate::utils::error::StorageError;

/// Ledger backed by a DynamoDB table.
pub struct DynamoLedger {
    client: Client,
    table: String,
}

impl DynamoLedger {
    /// Loads AWS credentials for the configured region and optional profile.
    pub async fn connect(config: &StoreConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;
        tracing::info!("Using DynamoDB table {} in {}", config.table, config.region);

        Self {
            client: Client::new(&sdk_config),
            table: config.table.clone(),
        }
    }
}

fn to_attributes(item: &LedgerItem) -> HashMap<String, AttributeValue> {
    [
        ("userId", AttributeValue::S(item.user_id.clone())),
        ("assetId", AttributeValue::S(item.asset_id.clone())),
        ("txId", AttributeValue::S(item.tx_id.clone())),
        ("assetType", AttributeValue::S(item.asset_type.clone())),
        ("gsi1pk", AttributeValue::S(item.gsi1pk.clone())),
        ("gsi1sk", AttributeValue::S(item.gsi1sk.clone())),
        ("type", AttributeValue::S(item.record_type.clone())),
        ("ticker", AttributeValue::S(item.ticker.clone())),
        ("contractMonth", AttributeValue::S(item.contract_month.clone())),
        ("tradeDate", AttributeValue::S(item.trade_date.clone())),
        ("qty", AttributeValue::N(item.qty.to_string())),
        ("grossPL", AttributeValue::N(item.gross_pl.clone())),
        ("notes", AttributeValue::S(item.notes.clone())),
        ("createdAt", AttributeValue::S(item.created_at.clone())),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value))
    .collect()
}

#[async_trait]
impl LedgerStore for DynamoLedger {
    async fn put_item(&self, item: &LedgerItem) -> Result<(), StorageError> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_attributes(item)))
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn scan_owner(&self) -> Result<Option<String>, StorageError> {
        let output = self
            .client
            .scan()
            .table_name(&self.table)
            .limit(1)
            .projection_expression("userId")
            .send()
            .await
            .map_err(|e| StorageError::Backend(DisplayErrorContext(e).to_string()))?;

        Ok(output
            .items()
            .first()
            .and_then(|item| item.get("userId"))
            .and_then(|value| value.as_s().ok())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fields_use_number_type() {
        let item = LedgerItem {
            user_id: "u".to_string(),
            asset_id: "id".to_string(),
            tx_id: "id".to_string(),
            asset_type: "FUTURES_TX".to_string(),
            gsi1pk: "u".to_string(),
            gsi1sk: "FUTURES_TX#2023-05-10#id".to_string(),
            record_type: "SUMMARY".to_string(),
            ticker: "ZB".to_string(),
            contract_month: "May23".to_string(),
            trade_date: "2023-05-10".to_string(),
            qty: 2,
            gross_pl: "125.50".to_string(),
            notes: String::new(),
            created_at: "2024-01-02T03:04:05.000Z".to_string(),
        };

        let attrs = to_attributes(&item);
        assert_eq!(attrs.len(), 14);
        assert_eq!(attrs.get("qty"), Some(&AttributeValue::N("2".to_string())));
        assert_eq!(attrs.get("grossPL"), Some(&AttributeValue::N("125.50".to_string())));
        assert_eq!(attrs.get("type"), Some(&AttributeValue::S("SUMMARY".to_string())));
    }
}
