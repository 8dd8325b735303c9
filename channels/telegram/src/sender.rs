use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use tracing::{debug, info};
use tracker::{Notifier, PollError};

/// Sends plain-text messages to one fixed Telegram chat.
pub struct TelegramNotifier {
    bot: Bot,
    chat: String,
    recipient: Recipient,
}

impl TelegramNotifier {
    pub fn new(token: &str, chat: &str) -> Self {
        Self {
            bot: Bot::new(token),
            chat: chat.trim().to_string(),
            recipient: parse_recipient(chat),
        }
    }

    /// Point the bot at a different Bot API server.
    pub fn with_api_url(mut self, url: url::Url) -> Self {
        self.bot = self.bot.set_api_url(url);
        self
    }
}

/// Numeric ids address a chat directly; anything else is treated as a
/// public channel username such as `@my_channel`.
pub fn parse_recipient(chat: &str) -> Recipient {
    let chat = chat.trim();
    match chat.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat.to_string()),
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), PollError> {
        debug!(chat = %self.chat, "Sending Telegram message");
        self.bot
            .send_message(self.recipient.clone(), text)
            .await
            .map_err(|e| PollError::NotificationDelivery(format!("Telegram: {}", e)))?;
        info!(chat = %self.chat, "Message sent to Telegram: {}", text);
        Ok(())
    }
}
