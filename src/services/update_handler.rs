//! Corrects a recorded item when the user replies to its confirmation.

use std::sync::Arc;

use crate::errors::LedgerError;
use crate::models::ledger::{InboundMessage, MessageRef};
use crate::services::formatting::{saved_text, texts};
use crate::services::ports::{MessagingPort, OutboundMessage, StoragePort};
use crate::services::price_parser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { name: String, price: i64 },
    /// Nothing recorded under the replied message; the reply was not a correction
    NotApplicable,
}

#[derive(Clone)]
pub struct UpdateHandler {
    messenger: Arc<dyn MessagingPort>,
    storage: Arc<dyn StoragePort>,
}

impl UpdateHandler {
    pub fn new(messenger: Arc<dyn MessagingPort>, storage: Arc<dyn StoragePort>) -> Self {
        Self { messenger, storage }
    }

    pub async fn apply(&self, msg: &InboundMessage, target: MessageRef) -> Result<UpdateOutcome, LedgerError> {
        let Some(parsed) = price_parser::parse_line(&msg.text) else {
            return Ok(UpdateOutcome::NotApplicable);
        };

        let affected = self
            .storage
            .update(target.chat_id, target.message_id, &parsed.description, parsed.price)
            .await?;

        if affected == 0 {
            tracing::debug!(
                chat_id = %target.chat_id,
                message_id = %target.message_id,
                "Priced reply does not target a recorded item"
            );
            return Ok(UpdateOutcome::NotApplicable);
        }

        self.messenger
            .edit(
                target.chat_id,
                target.message_id,
                &saved_text(&parsed.description, parsed.price),
            )
            .await?;

        let ack = OutboundMessage::new(texts::UPDATED).reply_to(target.message_id);
        self.messenger.send(target.chat_id, ack).await?;

        tracing::info!(
            chat_id = %target.chat_id,
            message_id = %target.message_id,
            price = parsed.price,
            "Updated item"
        );

        Ok(UpdateOutcome::Updated {
            name: parsed.description,
            price: parsed.price,
        })
    }
}
