//! Telegram Bot API client, the production [`MessagingPort`].

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

use crate::errors::MessagingError;
use crate::models::ledger::{ChatId, MessageId};
use crate::models::telegram::{
    ApiResponse, DeleteMessageRequest, EditMessageTextRequest, Message, SendMessageRequest,
};
use crate::services::ports::{Markup, MessagingPort, OutboundMessage};

const PARSE_MODE_MARKDOWN: &str = "Markdown";

#[derive(Clone)]
pub struct TelegramService {
    client: Client,
    token: String,
    base_url: String,
}

impl TelegramService {
    pub fn new(token: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, MessagingError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        // Telegram answers failures with the same envelope and ok = false
        let envelope: ApiResponse<T> = response.json().await?;
        if !envelope.ok {
            return Err(MessagingError::Api {
                code: envelope.error_code.unwrap_or(status.as_u16() as i64),
                description: envelope.description.unwrap_or_default(),
            });
        }

        envelope
            .result
            .ok_or_else(|| MessagingError::Unexpected(format!("{} returned no result", method)))
    }
}

/// Telegram's JSON shape for a [`Markup`].
pub fn reply_markup_json(markup: &Markup) -> serde_json::Value {
    match markup {
        Markup::ForceReply => json!({ "force_reply": true, "selective": true }),
        Markup::Keyboard(rows) => {
            let keyboard: Vec<Vec<serde_json::Value>> = rows
                .iter()
                .map(|row| row.iter().map(|label| json!({ "text": label })).collect())
                .collect();
            json!({
                "keyboard": keyboard,
                "resize_keyboard": true,
                "one_time_keyboard": true,
                "selective": true,
            })
        }
        Markup::RemoveKeyboard => json!({ "remove_keyboard": true }),
    }
}

#[async_trait]
impl MessagingPort for TelegramService {
    async fn send(
        &self,
        chat_id: ChatId,
        message: OutboundMessage,
    ) -> Result<MessageId, MessagingError> {
        let request = SendMessageRequest {
            chat_id: chat_id.0,
            text: &message.text,
            parse_mode: message.markdown.then_some(PARSE_MODE_MARKDOWN),
            reply_to_message_id: message.reply_to.map(|id| id.0),
            reply_markup: message.markup.as_ref().map(reply_markup_json),
        };

        let sent: Message = self.call("sendMessage", &request).await?;
        tracing::debug!(chat_id = %chat_id, message_id = sent.message_id, "Sent message");

        Ok(MessageId(sent.message_id))
    }

    async fn edit(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
    ) -> Result<(), MessagingError> {
        let request = EditMessageTextRequest {
            chat_id: chat_id.0,
            message_id: message_id.0,
            text,
            parse_mode: PARSE_MODE_MARKDOWN,
        };

        // Result is the edited Message, or `true` for inline messages
        let _: serde_json::Value = self.call("editMessageText", &request).await?;
        tracing::debug!(chat_id = %chat_id, message_id = %message_id, "Edited message");

        Ok(())
    }

    async fn delete(&self, chat_id: ChatId, message_id: MessageId) -> Result<(), MessagingError> {
        let request = DeleteMessageRequest {
            chat_id: chat_id.0,
            message_id: message_id.0,
        };

        let deleted: bool = self.call("deleteMessage", &request).await?;
        if !deleted {
            return Err(MessagingError::Unexpected(format!(
                "deleteMessage refused for message {}",
                message_id
            )));
        }
        tracing::debug!(chat_id = %chat_id, message_id = %message_id, "Deleted message");

        Ok(())
    }
}
