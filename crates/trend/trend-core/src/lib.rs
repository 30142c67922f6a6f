//! Trend Core
//!
//! Core implementations for trend augmentation: the signal field registry,
//! rolling statistics, bucket key extrapolation, the seasonal ARIMA forecaster
//! and the orchestrating pipeline.

pub mod augment;
pub mod bands;
pub mod confidence;
pub mod detector;
pub mod keys;
pub mod registry;
pub mod sarima;

// Re-export SPI types for implementations
pub use trend_spi::{BandPoint, ForecastPoint, Observation, Result, SignalForecaster, TrendError};

// Re-export main types
pub use augment::{augment, TrendAugmenter};
pub use bands::{compute_bands, RollingBands};
pub use detector::detect_signal_field;
pub use keys::{format_key, format_keys, future_keys};
pub use registry::SignalField;
pub use sarima::{Sarima, SarimaForecaster, SignalSeries};
