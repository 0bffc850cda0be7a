//! Application layer - Use cases and orchestration
//!
//! Contains the risk analyzers, report formatting, prompt building and the
//! cycle runners that drive one fetch, analyze, summarize and notify pass
//! through the ports defined here.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
