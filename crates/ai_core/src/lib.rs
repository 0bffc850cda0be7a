//! AI Core - Inference engine for forecast summaries
//!
//! Provides an abstraction for single-shot LLM text generation and an
//! implementation backed by the Ollama `/api/generate` endpoint.

pub mod config;
pub mod error;
pub mod ollama;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use ollama::OllamaInferenceEngine;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
