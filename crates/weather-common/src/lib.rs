//! Shared types for the weather-archive services.

pub mod error;

pub use error::{WeatherError, WeatherResult};
