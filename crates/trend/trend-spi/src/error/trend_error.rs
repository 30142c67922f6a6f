//! Trend error types

use thiserror::Error;

/// Errors that can occur while augmenting a metric series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrendError {
    /// Insufficient data points for the operation
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// A bucket key could not be read as an integer
    #[error("Unparseable key '{key}': {reason}")]
    UnparseableKey { key: String, reason: String },

    /// Extrapolating past a bucket key left the i64 range
    #[error("Key extrapolation overflowed past '{key}'")]
    KeyOverflow { key: String },

    /// Epoch milliseconds outside the representable date range
    #[error("Invalid timestamp: {0} ms")]
    InvalidTimestamp(i64),

    /// The signal field and its `total` fallback were both absent
    #[error("Missing value for signal field '{field}' at index {index}")]
    MissingSignal { field: String, index: usize },

    /// Model has not been fitted yet
    #[error("Model must be fitted before forecasting")]
    NotFitted,

    /// The forecast model could not be fitted
    #[error("Model fit failed: {0}")]
    ModelFit(String),

    /// Numerical computation error
    #[error("Numerical error: {0}")]
    NumericalError(String),
}
