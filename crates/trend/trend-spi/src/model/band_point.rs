//! Rolling statistics model

use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of a trailing window
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BandPoint {
    pub avg: f64,
    pub std: f64,
}

impl BandPoint {
    /// Value used for positions that precede a full window.
    pub const ZERO: BandPoint = BandPoint { avg: 0.0, std: 0.0 };

    pub fn new(avg: f64, std: f64) -> Self {
        Self { avg, std }
    }
}
