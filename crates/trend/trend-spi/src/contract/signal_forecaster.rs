//! Trait for forecasting a signal series

use crate::error::Result;
use crate::model::ForecastPoint;

/// Produces a bounded forecast from a signal history
pub trait SignalForecaster: Send + Sync {
    /// Forecast `horizon` steps past the end of `history`.
    ///
    /// Returns an empty vector when `history` is shorter than
    /// [`min_history`](Self::min_history); that is not an error.
    fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<ForecastPoint>>;

    /// Minimum history length required to produce a forecast
    fn min_history(&self) -> usize;
}
