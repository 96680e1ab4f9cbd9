use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Telegram chat id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

/// Telegram message id, unique within a chat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stable reference to a message, used as the key of a [`Record`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One recorded item.
///
/// `message_id` is the id of the confirmation message the bot sent when the
/// item was recorded, so replying to that confirmation is how the user
/// addresses the record later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

impl Record {
    pub fn key(&self) -> MessageRef {
        MessageRef {
            chat_id: self.chat_id,
            message_id: self.message_id,
        }
    }
}

/// The message a user replied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepliedMessage {
    pub message_id: MessageId,
    pub text: String,
}

/// Inbound chat message, stripped down to what the ledger needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub text: String,
    /// Command token without the leading slash or `@bot` suffix.
    pub command: Option<String>,
    pub replied_to: Option<RepliedMessage>,
}

impl InboundMessage {
    pub fn text(chat_id: i64, message_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id: ChatId(chat_id),
            message_id: MessageId(message_id),
            text: text.into(),
            command: None,
            replied_to: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn replying_to(mut self, message_id: i64, text: impl Into<String>) -> Self {
        self.replied_to = Some(RepliedMessage {
            message_id: MessageId(message_id),
            text: text.into(),
        });
        self
    }
}
