use reqwest::Client;
use thiserror::Error;
use tracing::debug;

const API_URL: &str = "https://api.telegram.org";

/// A failed delivery. Callers log this and move on; a lost notification must
/// never abort a poll cycle.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API returned {status}: {body}")]
    Api { status: u16, body: String },
}

pub struct Notifier {
    http: Client,
    token: String,
    chat_id: String,
    base_url: String,
}

impl Notifier {
    pub fn new(token: String, chat_id: String) -> Self {
        Self::with_base_url(token, chat_id, API_URL.to_string())
    }

    /// Point the notifier at a custom base URL (useful for testing).
    pub fn with_base_url(token: String, chat_id: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            token,
            chat_id,
            base_url,
        }
    }

    /// Send a text message to the configured chat.
    pub async fn send(&self, text: &str) -> Result<(), NotifyError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let body = serde_json::json!({
            "chat_id": self.chat_id,
            "text": text,
        });

        let resp = self.http.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }
        debug!("Telegram message sent");
        Ok(())
    }
}
