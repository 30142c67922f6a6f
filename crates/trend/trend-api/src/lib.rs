//! Trend Consumer API
//!
//! Consumer configuration for the trend augmentation pipeline.
//!
//! This crate provides:
//! - [`TrendConfig`], the value object every pipeline call takes
//! - [`SarimaConfig`] and [`SarimaOrder`] for the forecast model
//! - [`AggregationInterval`], the bucket granularity used for labels
//! - Re-exports from SPI for convenience

mod interval;

pub use interval::AggregationInterval;

// Re-export from SPI
pub use trend_spi::{BandPoint, ForecastPoint, Observation, Result, SignalForecaster, TrendError};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Environment flag gating the whole post-processing step
pub const ENV_ENABLED: &str = "PREDICTIONS_POSTPROCESS";
pub const ENV_WINDOW_SIZE: &str = "TREND_WINDOW_SIZE";
pub const ENV_HORIZON: &str = "TREND_HORIZON";
pub const ENV_CONFIDENCE_LEVEL: &str = "TREND_CONFIDENCE_LEVEL";
pub const ENV_TIMEZONE: &str = "TREND_TIMEZONE";

/// Seasonal ARIMA orders `(p, d, q)(P, D, Q)[period]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SarimaOrder {
    pub p: usize,
    pub d: usize,
    pub q: usize,
    pub seasonal_p: usize,
    pub seasonal_d: usize,
    pub seasonal_q: usize,
    /// Seasonal period in steps (7 = weekly on a daily grid)
    pub period: usize,
}

impl SarimaOrder {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            p,
            d,
            q,
            seasonal_p: 0,
            seasonal_d: 0,
            seasonal_q: 0,
            period: 0,
        }
    }

    pub fn with_seasonal(mut self, p: usize, d: usize, q: usize, period: usize) -> Self {
        self.seasonal_p = p;
        self.seasonal_d = d;
        self.seasonal_q = q;
        self.period = period;
        self
    }

    pub fn is_seasonal(&self) -> bool {
        self.seasonal_p + self.seasonal_d + self.seasonal_q > 0
    }

    /// Highest lag of the expanded autoregressive polynomial
    pub fn ar_lags(&self) -> usize {
        self.p + self.seasonal_p * self.period
    }

    /// Highest lag of the expanded moving-average polynomial
    pub fn ma_lags(&self) -> usize {
        self.q + self.seasonal_q * self.period
    }

    /// Number of free coefficients estimated by the fit
    pub fn parameter_count(&self) -> usize {
        self.p + self.q + self.seasonal_p + self.seasonal_q
    }
}

impl Default for SarimaOrder {
    fn default() -> Self {
        SarimaOrder::new(20, 0, 20).with_seasonal(7, 0, 7, 7)
    }
}

/// Configuration for the forecast model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SarimaConfig {
    pub order: SarimaOrder,
    /// Upper bound on simplex iterations during the CSS fit
    pub max_iterations: usize,
    /// Convergence threshold on the spread of objective values
    pub tolerance: f64,
}

impl Default for SarimaConfig {
    fn default() -> Self {
        Self {
            order: SarimaOrder::default(),
            max_iterations: 2_000,
            tolerance: 1e-8,
        }
    }
}

/// Configuration for the augmentation pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    /// When false the pipeline returns its input untouched
    pub enabled: bool,
    /// Trailing window used for the rolling statistics
    pub window_size: usize,
    /// Number of future buckets to forecast
    pub horizon: usize,
    /// Confidence level of the prediction interval (0.3 = 30%)
    pub confidence_level: f64,
    /// Zone used to render bucket labels
    pub timezone: Tz,
    pub sarima: SarimaConfig,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_size: 20,
            horizon: 10,
            confidence_level: 0.3,
            timezone: Tz::UTC,
            sarima: SarimaConfig::default(),
        }
    }
}

impl TrendConfig {
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_order(mut self, order: SarimaOrder) -> Self {
        self.sarima.order = order;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.sarima.max_iterations = max_iterations;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(invalid("window_size", "must be at least 1"));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(invalid(
                "confidence_level",
                format!("must be in (0, 1), got {}", self.confidence_level),
            ));
        }
        let order = &self.sarima.order;
        if order.is_seasonal() && order.period == 0 {
            return Err(invalid("period", "seasonal orders require a period of at least 1"));
        }
        if self.sarima.max_iterations == 0 {
            return Err(invalid("max_iterations", "must be at least 1"));
        }
        if !(self.sarima.tolerance.is_finite() && self.sarima.tolerance > 0.0) {
            return Err(invalid("tolerance", "must be a positive finite number"));
        }
        Ok(())
    }

    /// Build a configuration from process environment variables.
    ///
    /// The pipeline is enabled only when `PREDICTIONS_POSTPROCESS` is `TRUE`.
    /// Other variables override the defaults when present.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.enabled = lookup(ENV_ENABLED)
            .map(|v| v == "TRUE")
            .unwrap_or(false);

        if let Some(raw) = lookup(ENV_WINDOW_SIZE) {
            config.window_size = parse_var(ENV_WINDOW_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_HORIZON) {
            config.horizon = parse_var(ENV_HORIZON, &raw)?;
        }
        if let Some(raw) = lookup(ENV_CONFIDENCE_LEVEL) {
            config.confidence_level = parse_var(ENV_CONFIDENCE_LEVEL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEZONE) {
            config.timezone = raw
                .trim()
                .parse::<Tz>()
                .map_err(|e| invalid(ENV_TIMEZONE, e.to_string()))?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| invalid(name, format!("'{}': {}", raw, e)))
}

fn invalid(name: &str, reason: impl Into<String>) -> TrendError {
    TrendError::InvalidParameter {
        name: name.to_string(),
        reason: reason.into(),
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{AggregationInterval, SarimaConfig, SarimaOrder, TrendConfig};
    pub use trend_spi::{
        BandPoint, ForecastPoint, Observation, Result, SignalForecaster, TrendError,
    };
}
