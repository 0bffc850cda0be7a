//! Messenger configuration: Telegram bot credentials and API endpoint.

use application::ports::Destination;
use integration_telegram::TelegramConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Telegram integration configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramAppConfig {
    /// Bot API base URL (default: <https://api.telegram.org>)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bot token (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub bot_token: Option<SecretString>,

    /// Target chat id
    #[serde(default)]
    pub chat_id: Option<String>,
}

impl std::fmt::Debug for TelegramAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field(
                "bot_token",
                &if self.bot_token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
            bot_token: None,
            chat_id: None,
        }
    }
}

impl TelegramAppConfig {
    /// Whether both token and chat id are present and non-blank
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.destination().is_configured()
    }

    /// Delivery destination; unconfigured when either part is missing
    #[must_use]
    pub fn destination(&self) -> Destination {
        match (&self.bot_token, &self.chat_id) {
            (Some(token), Some(chat_id)) => Destination::new(
                SecretString::from(token.expose_secret().trim().to_owned()),
                chat_id.trim(),
            ),
            _ => Destination::unconfigured(),
        }
    }

    /// Client configuration for the Telegram integration
    #[must_use]
    pub fn client_config(&self) -> TelegramConfig {
        TelegramConfig {
            api_base_url: self.api_base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
