//! Built-in bots, selectable by name from the command line.

use anyhow::Context;
use async_trait::async_trait;
use std::sync::Arc;
use tgloop_core::{
    request::{AnswerCallbackQuery, SendMessage},
    traits::{Bot, BotApi, Transport},
    types::{Update, UpdateKind},
};
use tracing::info;

/// Names accepted by [`by_name`].
pub const NAMES: &[&str] = &["simple", "echo"];

/// Look up a built-in bot.
pub fn by_name(name: &str) -> Option<Arc<dyn Bot>> {
    match name {
        "simple" => Some(Arc::new(SimpleBot)),
        "echo" => Some(Arc::new(EchoBot)),
        _ => None,
    }
}

/// Logs who it is on start and every update it receives.
pub struct SimpleBot;

#[async_trait]
impl Bot for SimpleBot {
    fn name(&self) -> &str {
        "simple"
    }

    async fn on_start(&self, api: &dyn Transport) -> anyhow::Result<()> {
        let me = api.get_me().await.context("getMe failed")?;
        info!(id = me.id, username = ?me.username, "me: {}", me.display_name());
        Ok(())
    }

    async fn on_update(&self, _api: &dyn Transport, update: Update) -> anyhow::Result<()> {
        info!("received update: {update:?}");
        Ok(())
    }
}

/// Repeats text messages back to the chat they came from.
pub struct EchoBot;

#[async_trait]
impl Bot for EchoBot {
    fn name(&self) -> &str {
        "echo"
    }

    async fn on_start(&self, api: &dyn Transport) -> anyhow::Result<()> {
        let me = api.get_me().await.context("getMe failed")?;
        info!(id = me.id, "echoing as {}", me.display_name());
        Ok(())
    }

    async fn on_update(&self, api: &dyn Transport, update: Update) -> anyhow::Result<()> {
        match update.kind {
            UpdateKind::Message(message) => {
                let Some(text) = message.text else {
                    return Ok(());
                };
                api.send_message(SendMessage::new(message.chat.id, text).reply_to(message.id))
                    .await
                    .with_context(|| format!("failed to echo into chat {}", message.chat.id))?;
            }
            UpdateKind::CallbackQuery(query) => {
                api.answer_callback_query(AnswerCallbackQuery::new(query.id).text(query.data))
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }
}
