//! Domain layer for SkyWatch
//!
//! Contains the forecast entities, the value objects used to classify them
//! and the schedule arithmetic. This layer performs no I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
