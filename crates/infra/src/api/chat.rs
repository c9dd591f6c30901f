//! Chat endpoints: conversation list, message history, send, create,
//! delete.

use std::sync::Arc;

use rishta_domain::{ActionError, Envelope};
use rishta_core::{Notifier, ToastKind};
use serde::Serialize;
use serde_json::{json, Value};

use super::client::{ApiClient, RequestOptions};

const ALL_CHATS: &str = "chats";
const SEND_MESSAGE: &str = "chats/messages";
const CREATE_CHAT: &str = "chats/create";
const BY_ID: &str = "chats/";

/// Kind of message body being sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    File,
}

pub struct ChatApi {
    client: Arc<ApiClient>,
    notifier: Arc<dyn Notifier>,
}

impl ChatApi {
    #[must_use]
    pub fn new(client: Arc<ApiClient>, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// The caller's conversations.
    ///
    /// # Errors
    /// Rejected on a `success: false` answer, `Failed` on transport or
    /// HTTP-level errors; one notification either way.
    pub async fn all_chats(&self) -> Result<Vec<Value>, ActionError> {
        self.listing(ALL_CHATS).await
    }

    /// Message history for one conversation.
    ///
    /// # Errors
    /// Same split as [`ChatApi::all_chats`].
    pub async fn messages(&self, chat_id: &str) -> Result<Vec<Value>, ActionError> {
        self.listing(&format!("{BY_ID}{chat_id}/messages")).await
    }

    /// Send a message into a conversation.
    ///
    /// # Errors
    /// Same split as [`ChatApi::all_chats`].
    pub async fn send_message(
        &self,
        chat_id: &str,
        content: &str,
        kind: MessageKind,
    ) -> Result<Value, ActionError> {
        let body = json!({ "chatId": chat_id, "content": content, "messageType": kind });
        let envelope: Envelope<Value> = self
            .client
            .post(SEND_MESSAGE, &body, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or(Value::Null))
        } else {
            let message = envelope.message_or("Failed to send message").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// Open a conversation with another member.
    ///
    /// # Errors
    /// Same split as [`ChatApi::all_chats`].
    pub async fn create(&self, user_id: &str) -> Result<Value, ActionError> {
        let body = json!({ "userId": user_id });
        let envelope: Envelope<Value> = self
            .client
            .post(CREATE_CHAT, &body, &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier.notify(ToastKind::Success, envelope.message_or("Chat created"));
            Ok(envelope.data.unwrap_or(Value::Null))
        } else {
            let message = envelope.message_or("Failed to create chat").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    /// Delete a conversation.
    ///
    /// # Errors
    /// Same split as [`ChatApi::all_chats`].
    pub async fn delete(&self, chat_id: &str) -> Result<(), ActionError> {
        let envelope: Envelope<Value> = self
            .client
            .delete(&format!("{BY_ID}{chat_id}"), &RequestOptions::logged())
            .await
            .map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            self.notifier.notify(ToastKind::Success, envelope.message_or("Chat deleted"));
            Ok(())
        } else {
            let message = envelope.message_or("Failed to delete chat").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }

    async fn listing(&self, path: &str) -> Result<Vec<Value>, ActionError> {
        let envelope: Envelope<Vec<Value>> =
            self.client.get(path, &RequestOptions::logged()).await.map_err(|err| {
                self.notifier.notify(ToastKind::Error, &err.to_string());
                ActionError::Failed(err)
            })?;

        if envelope.success {
            Ok(envelope.data.unwrap_or_default())
        } else {
            let message = envelope.message_or("Failed to load chats").to_owned();
            self.notifier.notify(ToastKind::Error, &message);
            Err(ActionError::Rejected(message))
        }
    }
}
