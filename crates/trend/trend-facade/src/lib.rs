//! Trend Facade
//!
//! High-level API for augmenting aggregated metric series with rolling
//! Bollinger statistics and seasonal ARIMA forecasts. Re-exports all public
//! types from the trend stack for convenient usage.
//!
//! ```no_run
//! use trend_facade::prelude::*;
//!
//! let series: Vec<Observation> = Vec::new();
//! let augmented = TrendAugmenter::new(TrendConfig::default()).augment(&series, Some("week"));
//! assert_eq!(augmented.len(), series.len());
//! ```

// Re-export everything from API (which includes SPI)
pub use trend_api::*;

// Re-export core modules for direct access
pub use trend_core::{augment, bands, confidence, detector, keys, registry, sarima};

// Re-export core types at root
pub use trend_core::{
    compute_bands, detect_signal_field, format_key, format_keys, future_keys, RollingBands, Sarima,
    SarimaForecaster, SignalField, SignalSeries, TrendAugmenter,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use trend_api::prelude::*;
    pub use trend_core::{Sarima, SarimaForecaster, SignalField, TrendAugmenter};
}
