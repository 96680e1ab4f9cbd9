#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

use catatan_bot::errors::{MessagingError, StorageError};
use catatan_bot::models::ledger::{ChatId, MessageId, Record};
use catatan_bot::services::clock::FixedClock;
use catatan_bot::services::dispatcher::Dispatcher;
use catatan_bot::services::memory_store::MemoryItemStore;
use catatan_bot::services::period::{DateRange, PeriodResolver, WeekStart};
use catatan_bot::services::ports::{MessagingPort, OutboundMessage, StoragePort};

pub const CHAT: ChatId = ChatId(4242);

pub fn jakarta() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

/// Jakarta wall clock time as a UTC instant
pub fn wib(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    jakarta()
        .with_ymd_and_hms(y, m, d, h, min, 0)
        .unwrap()
        .with_timezone(&Utc)
}

pub fn periods() -> PeriodResolver {
    PeriodResolver::new(jakarta(), WeekStart::Sunday)
}

#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub message: OutboundMessage,
}

#[derive(Default)]
struct MessengerLog {
    next_id: i64,
    sent: Vec<SentMessage>,
    edits: Vec<(ChatId, MessageId, String)>,
    deletes: Vec<(ChatId, MessageId)>,
}

/// Messenger that records every call and hands out increasing message ids.
#[derive(Default)]
pub struct RecordingMessenger {
    log: Mutex<MessengerLog>,
    /// Sends whose text contains this fail
    fail_sends_containing: Mutex<Option<String>>,
    fail_deletes: Mutex<bool>,
}

impl RecordingMessenger {
    pub fn new() -> Arc<Self> {
        let messenger = Self::default();
        messenger.log.lock().next_id = 1000;
        Arc::new(messenger)
    }

    pub fn fail_sends_containing(&self, needle: &str) {
        *self.fail_sends_containing.lock() = Some(needle.to_string());
    }

    pub fn fail_deletes(&self) {
        *self.fail_deletes.lock() = true;
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.log.lock().sent.clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.log.lock().sent.iter().map(|s| s.message.text.clone()).collect()
    }

    pub fn edits(&self) -> Vec<(ChatId, MessageId, String)> {
        self.log.lock().edits.clone()
    }

    pub fn deletes(&self) -> Vec<(ChatId, MessageId)> {
        self.log.lock().deletes.clone()
    }
}

#[async_trait]
impl MessagingPort for RecordingMessenger {
    async fn send(
        &self,
        chat_id: ChatId,
        message: OutboundMessage,
    ) -> Result<MessageId, MessagingError> {
        if let Some(needle) = self.fail_sends_containing.lock().as_deref() {
            if message.text.contains(needle) {
                return Err(MessagingError::Api {
                    code: 429,
                    description: "Too Many Requests: retry after 5".to_string(),
                });
            }
        }

        let mut log = self.log.lock();
        log.next_id += 1;
        let message_id = MessageId(log.next_id);
        log.sent.push(SentMessage {
            chat_id,
            message_id,
            message,
        });
        Ok(message_id)
    }

    async fn edit(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), MessagingError> {
        self.log.lock().edits.push((chat_id, message_id, text.to_string()));
        Ok(())
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), MessagingError> {
        if *self.fail_deletes.lock() {
            return Err(MessagingError::Api {
                code: 400,
                description: "Bad Request: message can't be deleted".to_string(),
            });
        }
        self.log.lock().deletes.push((chat_id, message_id));
        Ok(())
    }
}

/// Memory store whose inserts fail for chosen item names.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryItemStore,
    failing_names: Mutex<Vec<String>>,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_inserts_named(&self, name: &str) {
        self.failing_names.lock().push(name.to_string());
    }
}

#[async_trait]
impl StoragePort for FlakyStore {
    async fn insert(&self, record: &Record) -> Result<(), StorageError> {
        if self.failing_names.lock().contains(&record.name) {
            return Err(StorageError::Unavailable("connection reset by peer".to_string()));
        }
        self.inner.insert(record).await
    }

    async fn update(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        name: &str,
        price: i64,
    ) -> Result<u64, StorageError> {
        self.inner.update(chat_id, message_id, name, price).await
    }

    async fn query(&self, chat_id: ChatId, range: &DateRange) -> Result<Vec<Record>, StorageError> {
        self.inner.query(chat_id, range).await
    }
}

pub fn dispatcher(
    messenger: Arc<RecordingMessenger>,
    store: Arc<FlakyStore>,
    now: DateTime<Utc>,
) -> Dispatcher {
    Dispatcher::new(messenger, store, Arc::new(FixedClock(now)), periods())
}
