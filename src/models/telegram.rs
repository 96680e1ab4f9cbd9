//! Telegram Bot API wire types.
//!
//! Only the fields the ledger reads are modelled; everything else in the
//! payload is ignored by serde.

use serde::{Deserialize, Serialize};

use super::ledger::{ChatId, InboundMessage, MessageId, RepliedMessage};

/// Webhook payload. See https://core.telegram.org/bots/api#update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    pub offset: i64,
    pub length: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub entities: Vec<MessageEntity>,
    #[serde(default)]
    pub reply_to_message: Option<Box<Message>>,
}

impl Message {
    /// Command token of a message starting with a `bot_command` entity,
    /// e.g. `catat` for both `/catat` and `/catat@CatatanBot`.
    pub fn command(&self) -> Option<String> {
        let text = self.text.as_deref()?;
        let is_command = self
            .entities
            .first()
            .is_some_and(|e| e.kind == "bot_command" && e.offset == 0);
        if !is_command {
            return None;
        }

        let token = text.split_whitespace().next()?.strip_prefix('/')?;
        let command = token.split('@').next().unwrap_or(token);
        if command.is_empty() {
            None
        } else {
            Some(command.to_string())
        }
    }

    /// Converts the message into the ledger's inbound shape.
    ///
    /// Returns `None` for messages without text (stickers, photos, joins).
    pub fn to_inbound(&self) -> Option<InboundMessage> {
        let text = self.text.clone()?;
        let replied_to = self.reply_to_message.as_ref().map(|replied| RepliedMessage {
            message_id: MessageId(replied.message_id),
            text: replied.text.clone().unwrap_or_default(),
        });

        Some(InboundMessage {
            chat_id: ChatId(self.chat.id),
            message_id: MessageId(self.message_id),
            text,
            command: self.command(),
            replied_to,
        })
    }
}

/// Envelope wrapping every Bot API response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct EditMessageTextRequest<'a> {
    pub chat_id: i64,
    pub message_id: i64,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

#[derive(Debug, Serialize)]
pub struct DeleteMessageRequest {
    pub chat_id: i64,
    pub message_id: i64,
}
