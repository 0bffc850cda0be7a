//! Ollama inference engine implementation
//!
//! Talks to the non-streaming `/api/generate` endpoint of an Ollama server.

mod client;

pub use client::OllamaInferenceEngine;
