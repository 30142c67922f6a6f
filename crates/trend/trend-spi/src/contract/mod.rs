//! Contract module containing trait definitions for trend operations

mod signal_forecaster;

pub use signal_forecaster::SignalForecaster;
