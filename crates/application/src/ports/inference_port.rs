//! Inference port - Interface for LLM summarization

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of an inference call
#[derive(Debug, Clone)]
pub struct InferenceResult {
    /// Generated response content
    pub content: String,
    /// Model used for generation
    pub model: String,
    /// Number of tokens used (if available)
    pub tokens_used: Option<u32>,
    /// Latency in milliseconds
    pub latency_ms: u64,
}

/// Port for inference operations
///
/// A single best-effort, non-streaming call per cycle.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait InferencePort: Send + Sync {
    /// Generate a response for a prompt
    async fn generate(&self, prompt: &str) -> Result<InferenceResult, ApplicationError>;

    /// Whether the inference server answers at all
    ///
    /// Unreachable servers only degrade reports to the deterministic analysis.
    async fn is_available(&self) -> bool;

    /// Get the name of the current model
    fn current_model(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn InferencePort) {}

    #[test]
    fn inference_result_clone() {
        let result = InferenceResult {
            content: "Mostly westerly".to_string(),
            model: "llama3.1".to_string(),
            tokens_used: Some(12),
            latency_ms: 850,
        };
        let cloned = result.clone();
        assert_eq!(cloned.content, "Mostly westerly");
        assert_eq!(cloned.tokens_used, Some(12));
    }
}
