//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod ollama_inference_adapter;
mod telegram_adapter;
mod weather_adapter;

pub use ollama_inference_adapter::OllamaInferenceAdapter;
pub use telegram_adapter::TelegramAdapter;
pub use weather_adapter::WeatherAdapter;
