//! Trend Service Provider Interface
//!
//! Defines the observation model, error types and the forecasting contract
//! shared by the trend augmentation crates.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::SignalForecaster;
pub use error::{Result, TrendError};
pub use model::{BandPoint, ForecastPoint, Observation};
