//! Rolling statistics (Bollinger-style bands)

use trend_spi::BandPoint;

/// Trailing-window mean and population standard deviation.
///
/// The window for position `i` is the `window` values strictly before `i`;
/// the current value is excluded. Positions without a full window report
/// [`BandPoint::ZERO`], the statistics of the single-element window `[0.0]`.
#[derive(Debug, Clone)]
pub struct RollingBands {
    window: usize,
}

impl RollingBands {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// One band per input position.
    pub fn calculate(&self, data: &[f64]) -> Vec<BandPoint> {
        (0..data.len())
            .map(|i| {
                if i < self.window || self.window == 0 {
                    BandPoint::ZERO
                } else {
                    window_stats(&data[i - self.window..i])
                }
            })
            .collect()
    }
}

/// Bands for `values` over a trailing window of `window_size`.
pub fn compute_bands(values: &[f64], window_size: usize) -> Vec<BandPoint> {
    RollingBands::new(window_size).calculate(values)
}

fn window_stats(window: &[f64]) -> BandPoint {
    let n = window.len() as f64;
    let avg = window.iter().sum::<f64>() / n;
    let variance = window.iter().map(|x| (x - avg).powi(2)).sum::<f64>() / n;
    BandPoint::new(avg, variance.sqrt())
}
