use crate::{
    error::TgError,
    request::{
        chat_action_params, AnswerCallbackQuery, ChatId, EditMessageText, GetUpdates, Params,
        SendDocument, SendLocation, SendMessage, SetWebhook,
    },
    types::{ChatAction, Message, Update, User, WebhookInfo},
};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Transport trait: one authenticated Bot API call.
///
/// Implementations serialize `params`, send them, and classify the
/// envelope. On `ok: true` the raw `result` is returned for the caller to
/// decode; on `ok: false` the call fails with [`TgError::Api`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, method: &str, params: Params) -> Result<Value, TgError>;
}

/// Decode a `result` payload into the type a method returns.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, TgError> {
    Ok(serde_json::from_value(value)?)
}

/// Result of `editMessageText`.
#[derive(Debug, Clone, PartialEq)]
pub enum Edited {
    /// The edited chat message.
    Message(Box<Message>),
    /// Inline messages are acknowledged with `true` only.
    Inline,
}

/// Typed Bot API methods, available on every [`Transport`].
#[async_trait]
pub trait BotApi: Transport {
    /// Check the token; returns the bot's own user.
    async fn get_me(&self) -> Result<User, TgError> {
        decode(self.call("getMe", Params::new()).await?)
    }

    /// `getUpdates` without decoding the individual updates.
    async fn get_updates_raw(&self, request: GetUpdates) -> Result<Vec<Value>, TgError> {
        decode(self.call("getUpdates", request.into_params()).await?)
    }

    /// Long-poll for updates. Any undecodable update fails the whole call.
    async fn get_updates(&self, request: GetUpdates) -> Result<Vec<Update>, TgError> {
        decode(self.call("getUpdates", request.into_params()).await?)
    }

    async fn send_message(&self, request: SendMessage) -> Result<Message, TgError> {
        decode(self.call("sendMessage", request.into_params()).await?)
    }

    async fn edit_message_text(&self, request: EditMessageText) -> Result<Edited, TgError> {
        match self.call("editMessageText", request.into_params()).await? {
            Value::Bool(_) => Ok(Edited::Inline),
            other => Ok(Edited::Message(Box::new(decode(other)?))),
        }
    }

    async fn send_chat_action(&self, chat_id: ChatId, action: ChatAction) -> Result<(), TgError> {
        self.call("sendChatAction", chat_action_params(chat_id, action))
            .await?;
        Ok(())
    }

    async fn answer_callback_query(&self, request: AnswerCallbackQuery) -> Result<bool, TgError> {
        decode(self.call("answerCallbackQuery", request.into_params()).await?)
    }

    async fn send_location(&self, request: SendLocation) -> Result<Message, TgError> {
        decode(self.call("sendLocation", request.into_params()).await?)
    }

    async fn send_document(&self, request: SendDocument) -> Result<Message, TgError> {
        decode(self.call("sendDocument", request.into_params()).await?)
    }

    async fn set_webhook(&self, request: SetWebhook) -> Result<bool, TgError> {
        decode(self.call("setWebhook", request.into_params()).await?)
    }

    /// Switch back to `getUpdates` delivery.
    async fn delete_webhook(&self) -> Result<bool, TgError> {
        decode(self.call("deleteWebhook", Params::new()).await?)
    }

    async fn get_webhook_info(&self) -> Result<WebhookInfo, TgError> {
        decode(self.call("getWebhookInfo", Params::new()).await?)
    }
}

impl<T: Transport + ?Sized> BotApi for T {}

/// Bot trait: the update handler driven by the polling runner.
///
/// Implementations are plugged into the runner as `Arc<dyn Bot>`; the
/// runner never needs to know the concrete type.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Human-readable bot name.
    fn name(&self) -> &str;

    /// Called once before the first fetch. A failure aborts startup.
    async fn on_start(&self, _api: &dyn Transport) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handle one update. Errors are logged by the runner and never stop it.
    async fn on_update(&self, api: &dyn Transport, update: Update) -> anyhow::Result<()>;
}
