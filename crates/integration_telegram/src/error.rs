//! Telegram error types

use thiserror::Error;

/// Telegram API errors
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Connection to the Bot API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The Bot API rejected the request
    #[error("API error: {code} - {description}")]
    Api { code: i32, description: String },

    /// Too many requests; retry after the given number of seconds
    #[error("Rate limited, retry after {retry_after:?}s")]
    RateLimited { retry_after: Option<u64> },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Missing bot token or chat id
    #[error("Missing configuration: {0}")]
    Configuration(String),

    /// Message exceeds the Bot API length limit
    #[error("Message too long: {0} characters")]
    MessageTooLong(usize),
}

impl TelegramError {
    /// Whether the failure is likely to succeed on a later attempt
    pub const fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::RateLimited { .. } | Self::Request(_)
        )
    }
}
