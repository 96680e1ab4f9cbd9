//! In-process [`StoragePort`] for running without a database.
//!
//! Nothing survives a restart.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::errors::StorageError;
use crate::models::ledger::{ChatId, MessageId, Record};
use crate::services::period::DateRange;
use crate::services::ports::StoragePort;

#[derive(Clone, Default)]
pub struct MemoryItemStore {
    records: Arc<RwLock<Vec<Record>>>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every stored record, in insertion order.
    pub fn snapshot(&self) -> Vec<Record> {
        self.records.read().clone()
    }

    pub fn get(&self, chat_id: ChatId, message_id: MessageId) -> Option<Record> {
        self.records
            .read()
            .iter()
            .find(|r| r.chat_id == chat_id && r.message_id == message_id)
            .cloned()
    }
}

#[async_trait]
impl StoragePort for MemoryItemStore {
    async fn insert(&self, record: &Record) -> Result<(), StorageError> {
        let mut records = self.records.write();
        if records.iter().any(|r| r.key() == record.key()) {
            return Err(StorageError::Unavailable(format!(
                "duplicate key ({}, {})",
                record.chat_id, record.message_id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn update(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        name: &str,
        price: i64,
    ) -> Result<u64, StorageError> {
        let mut records = self.records.write();
        let mut affected = 0;
        for record in records
            .iter_mut()
            .filter(|r| r.chat_id == chat_id && r.message_id == message_id)
        {
            record.name = name.to_string();
            record.price = price;
            affected += 1;
        }
        Ok(affected)
    }

    async fn query(&self, chat_id: ChatId, range: &DateRange) -> Result<Vec<Record>, StorageError> {
        let mut found: Vec<Record> = self
            .records
            .read()
            .iter()
            .filter(|r| r.chat_id == chat_id && range.contains(r.created_at))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.created_at);
        Ok(found)
    }
}
