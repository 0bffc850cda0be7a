//! Telegram integration
//!
//! Sends messages through the Telegram Bot API and escapes text for its
//! MarkdownV2 parse mode.

pub mod client;
pub mod error;
pub mod markdown;

pub use client::{MAX_MESSAGE_LENGTH, ParseMode, SentMessage, TelegramClient, TelegramConfig};
pub use error::TelegramError;
pub use markdown::{bold, code_block, escape_markdown_v2};
