//! Port definitions for inference engine
//!
//! Defines the traits (ports) that inference adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request for a single completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Prompt text
    pub prompt: String,
    /// System prompt (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Model to use (overrides config default)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl InferenceRequest {
    /// Create a request with only a prompt
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system: None,
            model: None,
            max_tokens: None,
            temperature: None,
        }
    }

    /// Set the system prompt
    #[must_use]
    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the model for this request
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set temperature
    #[must_use]
    pub const fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content, trimmed
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub prompt_tokens: u32,
    /// Tokens generated
    pub completion_tokens: u32,
    /// Sum of both
    pub total_tokens: u32,
}

/// Inference engine port
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a completion
    async fn generate(&self, request: InferenceRequest)
    -> Result<InferenceResponse, InferenceError>;

    /// Check whether the server answers
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// Model used when a request does not name one
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_request_has_no_overrides() {
        let request = InferenceRequest::simple("Summarize");
        assert_eq!(request.prompt, "Summarize");
        assert!(request.system.is_none());
        assert!(request.model.is_none());
    }

    #[test]
    fn builder_chaining() {
        let request = InferenceRequest::simple("Summarize")
            .with_system("Be brief")
            .with_model("mistral")
            .with_temperature(0.1);
        assert_eq!(request.system.as_deref(), Some("Be brief"));
        assert_eq!(request.model.as_deref(), Some("mistral"));
        assert_eq!(request.temperature, Some(0.1));
    }

    #[test]
    fn serialization_skips_none_fields() {
        let json = serde_json::to_string(&InferenceRequest::simple("x")).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("model"));
    }
}
