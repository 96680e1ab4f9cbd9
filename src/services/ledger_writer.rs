//! Records the priced lines of a reply to the insert prompt.
//!
//! Every line is announced first and persisted second. When persisting fails
//! the announcement is taken back: the confirmation is deleted and a failure
//! notice is sent, so the chat never shows an item the store does not have.

use std::sync::Arc;

use crate::errors::{LedgerError, StorageError};
use crate::models::ledger::{ChatId, InboundMessage, MessageId, Record};
use crate::services::clock::Clock;
use crate::services::formatting::{save_failed_text, saved_text};
use crate::services::ports::{MessagingPort, OutboundMessage, StoragePort};
use crate::services::price_parser;

/// What happened to one line.
#[derive(Debug)]
pub enum LineOutcome {
    /// No trailing price, nothing sent or stored
    Skipped,
    Persisted(Record),
    /// Storing failed after the confirmation went out; the confirmation has
    /// been taken back as far as the messaging side allowed.
    CompensatedFailure {
        error: StorageError,
        compensation: Compensation,
    },
}

/// Which compensation steps went through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Compensation {
    pub confirmation_deleted: bool,
    pub failure_notice_sent: bool,
}

#[derive(Clone)]
pub struct LedgerWriter {
    messenger: Arc<dyn MessagingPort>,
    storage: Arc<dyn StoragePort>,
    clock: Arc<dyn Clock>,
}

impl LedgerWriter {
    pub fn new(
        messenger: Arc<dyn MessagingPort>,
        storage: Arc<dyn StoragePort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            messenger,
            storage,
            clock,
        }
    }

    /// Records every priced line of `msg`, one after another.
    ///
    /// Stops at the first line that fails; lines before it stay recorded.
    pub async fn record_lines(&self, msg: &InboundMessage) -> Result<Vec<Record>, LedgerError> {
        let mut recorded = Vec::new();

        for line in msg.text.split('\n') {
            match self.record_line(msg.chat_id, msg.message_id, line.trim()).await? {
                LineOutcome::Skipped => {}
                LineOutcome::Persisted(record) => recorded.push(record),
                LineOutcome::CompensatedFailure { error, .. } => {
                    return Err(LedgerError::Persistence(error));
                }
            }
        }

        tracing::info!(chat_id = %msg.chat_id, count = recorded.len(), "Recorded items");
        Ok(recorded)
    }

    /// Announces, stores and if needed compensates a single line.
    ///
    /// `request_id` is the user's message, which the failure notice replies to.
    /// A confirmation that cannot be sent is returned as an error since there
    /// is nothing to take back yet.
    pub async fn record_line(
        &self,
        chat_id: ChatId,
        request_id: MessageId,
        line: &str,
    ) -> Result<LineOutcome, LedgerError> {
        let Some(parsed) = price_parser::parse_line(line) else {
            return Ok(LineOutcome::Skipped);
        };

        let confirmation = OutboundMessage::new(saved_text(&parsed.description, parsed.price)).markdown();
        let confirmation_id = self.messenger.send(chat_id, confirmation).await?;

        let record = Record {
            chat_id,
            message_id: confirmation_id,
            name: parsed.description,
            price: parsed.price,
            created_at: self.clock.now(),
        };

        match self.storage.insert(&record).await {
            Ok(()) => Ok(LineOutcome::Persisted(record)),
            Err(error) => {
                tracing::error!(
                    chat_id = %chat_id,
                    message_id = %confirmation_id,
                    error = %error,
                    "Failed to store item, taking back confirmation"
                );
                let compensation = self.compensate(&record, request_id).await;
                Ok(LineOutcome::CompensatedFailure {
                    error,
                    compensation,
                })
            }
        }
    }

    async fn compensate(&self, record: &Record, request_id: MessageId) -> Compensation {
        let confirmation_deleted = match self.messenger.delete(record.chat_id, record.message_id).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(
                    chat_id = %record.chat_id,
                    message_id = %record.message_id,
                    error = %e,
                    "Failed to delete confirmation of unsaved item"
                );
                false
            }
        };

        let notice = OutboundMessage::new(save_failed_text(&record.name, record.price))
            .reply_to(request_id)
            .markdown();
        let failure_notice_sent = match self.messenger.send(record.chat_id, notice).await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    chat_id = %record.chat_id,
                    error = %e,
                    "Failed to send failure notice"
                );
                false
            }
        };

        Compensation {
            confirmation_deleted,
            failure_notice_sent,
        }
    }
}
