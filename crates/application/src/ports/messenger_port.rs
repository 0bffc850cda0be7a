//! Messenger port - delivery of cycle reports
//!
//! The port receives a structured [`CycleReport`] rather than pre-rendered
//! text so that each transport applies its own markup and escaping.

use std::fmt;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use secrecy::{ExposeSecret, SecretString};

use crate::error::ApplicationError;

/// Where a report is delivered
///
/// Both parts must be non-empty for delivery to happen; an unconfigured
/// destination turns notification into a no-op.
#[derive(Clone)]
pub struct Destination {
    credential: SecretString,
    recipient: String,
}

impl Destination {
    /// Create a destination from a transport credential and a recipient id
    #[must_use]
    pub fn new(credential: SecretString, recipient: impl Into<String>) -> Self {
        Self {
            credential,
            recipient: recipient.into(),
        }
    }

    /// A destination with no credentials
    #[must_use]
    pub fn unconfigured() -> Self {
        Self::new(SecretString::from(String::new()), String::new())
    }

    /// Transport credential (e.g. bot token)
    #[must_use]
    pub const fn credential(&self) -> &SecretString {
        &self.credential
    }

    /// Recipient identifier (e.g. chat id)
    #[must_use]
    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// Check that both credential and recipient are present
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.credential.expose_secret().trim().is_empty() && !self.recipient.trim().is_empty()
    }
}

impl fmt::Debug for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Destination")
            .field("credential", &"[REDACTED]")
            .field("recipient", &self.recipient)
            .finish()
    }
}

/// Outcome of one cycle, ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    /// Short heading, e.g. "London Heathrow wind outlook"
    pub title: String,
    /// Fixed-width table
    pub report: String,
    /// Deterministic risk analysis text
    pub analysis_summary: String,
    /// Narrative summary; `None` when summarization failed
    pub llm_summary: Option<String>,
}

impl CycleReport {
    /// Whether the narrative summary is missing
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.llm_summary.is_none()
    }

    /// Plain-text rendering for logs and transports without markup
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut parts = vec![
            self.title.clone(),
            String::new(),
            self.analysis_summary.clone(),
            String::new(),
            self.report.trim_end().to_string(),
        ];
        if let Some(summary) = &self.llm_summary {
            parts.push(String::new());
            parts.push("Summary:".to_string());
            parts.push(summary.clone());
        }
        parts.join("\n")
    }
}

/// Port for delivering reports to a messaging channel
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessengerPort: Send + Sync {
    /// Send a report to a destination
    async fn send(
        &self,
        destination: &Destination,
        report: &CycleReport,
    ) -> Result<(), ApplicationError>;

    /// Name of the transport for logging
    fn transport_name(&self) -> &'static str;
}
