//! Forecast model output

use serde::{Deserialize, Serialize};

/// One forecast step: lower bound, point forecast, upper bound
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub lower: f64,
    pub mid: f64,
    pub upper: f64,
}

impl ForecastPoint {
    pub fn new(lower: f64, mid: f64, upper: f64) -> Self {
        Self { lower, mid, upper }
    }

    /// Symmetric interval of half-width `margin` around `mid`
    pub fn around(mid: f64, margin: f64) -> Self {
        Self {
            lower: mid - margin,
            mid,
            upper: mid + margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    pub fn is_finite(&self) -> bool {
        self.lower.is_finite() && self.mid.is_finite() && self.upper.is_finite()
    }
}
