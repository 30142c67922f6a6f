//! Daily signal series anchored to a wall-clock instant.

use chrono::{DateTime, Duration, Utc};

/// Signal history laid on a daily grid whose last point is `anchor`.
///
/// The grid is independent of the bucket keys of the observations: bucket
/// arithmetic for forecast keys is done separately on the keys themselves.
#[derive(Debug, Clone)]
pub struct SignalSeries {
    anchor: DateTime<Utc>,
    values: Vec<f64>,
}

impl SignalSeries {
    pub fn daily_ending_at(values: &[f64], anchor: DateTime<Utc>) -> Self {
        Self {
            anchor,
            values: values.to_vec(),
        }
    }

    /// Series ending at the current wall-clock time.
    pub fn daily_ending_now(values: &[f64]) -> Self {
        Self::daily_ending_at(values, Utc::now())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.anchor
    }

    /// Timestamp of the first point.
    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.timestamp(0)
    }

    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        let back = self.values.len().checked_sub(index + 1)?;
        self.anchor
            .checked_sub_signed(Duration::days(i64::try_from(back).ok()?))
    }

    /// Timestamps of the `horizon` points following the series.
    pub fn forecast_timestamps(&self, horizon: usize) -> Vec<DateTime<Utc>> {
        (1..=horizon as i64)
            .map_while(|h| self.anchor.checked_add_signed(Duration::days(h)))
            .collect()
    }
}
