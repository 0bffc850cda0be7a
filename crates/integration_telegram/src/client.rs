//! Telegram client for sending messages
//!
//! Uses the Bot API `sendMessage` method.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::TelegramError;

/// Bot API limit on message text, in characters
pub const MAX_MESSAGE_LENGTH: usize = 4096;

/// Text formatting mode understood by the Bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "MarkdownV2")]
    MarkdownV2,
}

/// Telegram client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot API base URL (default: <https://api.telegram.org>)
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_base_url() -> String {
    "https://api.telegram.org".to_string()
}

const fn default_timeout() -> u64 {
    10
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
}

/// Envelope every Bot API response is wrapped in
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<SentMessage>,
    #[serde(default)]
    error_code: Option<i32>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Option<ResponseParameters>,
}

#[derive(Debug, Deserialize)]
struct ResponseParameters {
    #[serde(default)]
    retry_after: Option<u64>,
}

/// Message accepted by the Bot API
#[derive(Debug, Clone, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
    #[serde(default)]
    pub date: i64,
}

/// Telegram Bot API client
///
/// The bot token is supplied per call so one client can serve several bots.
#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramConfig,
}

impl TelegramClient {
    /// Create a new Telegram client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TelegramError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn with_defaults() -> Result<Self, TelegramError> {
        Self::new(TelegramConfig::default())
    }

    fn method_url(&self, token: &str, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_base_url.trim_end_matches('/'),
            token,
            method
        )
    }

    /// Send a text message to a chat
    #[instrument(skip(self, token, text), fields(chat_id = %chat_id, len = text.len()))]
    pub async fn send_message(
        &self,
        token: &str,
        chat_id: &str,
        text: &str,
        parse_mode: Option<ParseMode>,
    ) -> Result<SentMessage, TelegramError> {
        if token.trim().is_empty() {
            return Err(TelegramError::Configuration("bot token is required".to_string()));
        }
        if chat_id.trim().is_empty() {
            return Err(TelegramError::Configuration("chat id is required".to_string()));
        }
        let length = text.chars().count();
        if length > MAX_MESSAGE_LENGTH {
            return Err(TelegramError::MessageTooLong(length));
        }

        let request = SendMessageRequest {
            chat_id,
            text,
            parse_mode,
        };

        debug!(parse_mode = ?parse_mode, "Sending Telegram message");

        let response = self
            .client
            .post(self.method_url(token, "sendMessage"))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL; strip it so the token stays out of logs
                let e = e.without_url();
                if e.is_connect() || e.is_timeout() {
                    TelegramError::ConnectionFailed(e.to_string())
                } else {
                    TelegramError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        let body: ApiResponse = response.json().await.map_err(|e| {
            TelegramError::InvalidResponse(format!("HTTP {status}: {}", e.without_url()))
        })?;

        if body.ok {
            return body.result.ok_or_else(|| {
                TelegramError::InvalidResponse("missing result in ok response".to_string())
            });
        }

        let description = body
            .description
            .unwrap_or_else(|| format!("HTTP {status}"));
        warn!(status = %status, error = %description, "Telegram rejected message");

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(TelegramError::RateLimited {
                retry_after: body.parameters.and_then(|p| p.retry_after),
            });
        }
        Err(TelegramError::Api {
            code: body.error_code.unwrap_or_else(|| i32::from(status.as_u16())),
            description,
        })
    }
}
