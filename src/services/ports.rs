//! Capabilities the ledger needs from the outside world.

use async_trait::async_trait;

use crate::errors::{MessagingError, StorageError};
use crate::models::ledger::{ChatId, MessageId, Record};
use crate::services::period::DateRange;

/// Reply markup attached to an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// Opens the reply box on the addressed user's client
    ForceReply,
    /// One-time reply keyboard, one inner `Vec` per row
    Keyboard(Vec<Vec<String>>),
    RemoveKeyboard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub text: String,
    pub reply_to: Option<MessageId>,
    pub markup: Option<Markup>,
    /// Render `text` as Markdown
    pub markdown: bool,
}

impl OutboundMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_to: None,
            markup: None,
            markdown: false,
        }
    }

    pub fn reply_to(mut self, message_id: MessageId) -> Self {
        self.reply_to = Some(message_id);
        self
    }

    pub fn markup(mut self, markup: Markup) -> Self {
        self.markup = Some(markup);
        self
    }

    pub fn markdown(mut self) -> Self {
        self.markdown = true;
        self
    }
}

#[async_trait]
pub trait MessagingPort: Send + Sync {
    /// Sends a message and returns the id the platform assigned to it.
    async fn send(&self, chat_id: ChatId, message: OutboundMessage)
        -> Result<MessageId, MessagingError>;

    /// Replaces the text of a message the bot sent earlier (Markdown).
    async fn edit(&self, chat_id: ChatId, message_id: MessageId, text: &str)
        -> Result<(), MessagingError>;

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), MessagingError>;
}

#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn insert(&self, record: &Record) -> Result<(), StorageError>;

    /// Rewrites name and price of the record keyed by `(chat_id, message_id)`.
    /// Returns the number of rows changed, 0 when no such record exists.
    async fn update(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        name: &str,
        price: i64,
    ) -> Result<u64, StorageError>;

    /// Records of `chat_id` created within `range`, oldest first.
    async fn query(&self, chat_id: ChatId, range: &DateRange) -> Result<Vec<Record>, StorageError>;
}
