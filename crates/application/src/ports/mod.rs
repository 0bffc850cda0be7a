//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod inference_port;
mod messenger_port;
mod weather_port;

#[cfg(test)]
pub use inference_port::MockInferencePort;
pub use inference_port::{InferencePort, InferenceResult};
#[cfg(test)]
pub use messenger_port::MockMessengerPort;
pub use messenger_port::{CycleReport, Destination, MessengerPort};
pub use weather_port::{RainForecastPort, WindForecastPort};
#[cfg(test)]
pub use weather_port::{MockRainForecastPort, MockWindForecastPort};
