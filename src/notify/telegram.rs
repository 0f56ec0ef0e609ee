/// Telegram Bot API messenger.
///
/// Delivers messages via the `sendMessage` endpoint and verifies
/// credentials via `getMe`.
use tracing::debug;

use crate::notify::{Messenger, NotifyError};

/// Sends messages through the Telegram Bot API
#[derive(Debug)]
pub struct TelegramNotifier {
    bot_token: String,
    client: reqwest::Client,
}

impl TelegramNotifier {
    /// Create a notifier for the given bot token
    pub fn new(bot_token: String) -> Result<Self, NotifyError> {
        if bot_token.is_empty() {
            return Err(NotifyError::Api(
                "Bot token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            bot_token,
            client: reqwest::Client::new(),
        })
    }

    /// Bot API endpoint URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.bot_token, method)
    }

    /// Verify the token against `getMe`, returning the bot's username
    pub async fn check_connectivity(&self) -> Result<String, NotifyError> {
        let response = self.client.get(self.api_url("getMe")).send().await?;
        let body: serde_json::Value = response.json().await?;

        if body.get("ok") == Some(&serde_json::Value::Bool(true)) {
            let username = body
                .pointer("/result/username")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
                .to_string();
            return Ok(username);
        }

        Err(NotifyError::Api(api_description(&body)))
    }
}

#[async_trait::async_trait]
impl Messenger for TelegramNotifier {
    /// Send one text message via the Telegram `sendMessage` API
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
        });

        debug!(chat_id = %chat_id, "Sending Telegram message");

        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .await?;
        let resp_body: serde_json::Value = response.json().await?;

        if resp_body.get("ok") == Some(&serde_json::Value::Bool(true)) {
            return Ok(());
        }

        Err(NotifyError::Api(api_description(&resp_body)))
    }
}

/// Pull the human-readable error description out of an API response body
fn api_description(body: &serde_json::Value) -> String {
    body.get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("Unknown Telegram API error")
        .to_string()
}
