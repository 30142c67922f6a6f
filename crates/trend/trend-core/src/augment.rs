//! Augmentation pipeline
//!
//! Adds rolling statistics to every observation of an aggregated series and
//! appends forecast buckets. Failures never reach the caller: [`TrendAugmenter::augment`]
//! returns the input unchanged when any stage errors.

use tracing::{debug, warn};
use trend_api::{AggregationInterval, TrendConfig};
use trend_spi::{Observation, Result, SignalForecaster, TrendError};

use crate::bands::compute_bands;
use crate::detector::detect_signal_field;
use crate::keys::{format_keys, future_keys};
use crate::sarima::SarimaForecaster;

/// Bands-and-forecast post-processor for aggregated series
#[derive(Debug, Clone)]
pub struct TrendAugmenter<F = SarimaForecaster> {
    config: TrendConfig,
    forecaster: F,
}

impl TrendAugmenter<SarimaForecaster> {
    pub fn new(config: TrendConfig) -> Self {
        let forecaster = SarimaForecaster::from_config(&config);
        Self { config, forecaster }
    }
}

impl Default for TrendAugmenter<SarimaForecaster> {
    fn default() -> Self {
        Self::new(TrendConfig::default())
    }
}

impl<F: SignalForecaster> TrendAugmenter<F> {
    pub fn with_forecaster(config: TrendConfig, forecaster: F) -> Self {
        Self { config, forecaster }
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Augment `observations`, returning them unchanged on any failure.
    pub fn augment(&self, observations: &[Observation], interval: Option<&str>) -> Vec<Observation> {
        match self.try_augment(observations, interval) {
            Ok(augmented) => augmented,
            Err(err) => {
                warn!(
                    error = %err,
                    observations = observations.len(),
                    "trend augmentation failed, returning series unchanged"
                );
                observations.to_vec()
            }
        }
    }

    /// Augment `observations`, surfacing failures.
    ///
    /// Too-short series and series without a signal field are returned
    /// unchanged as `Ok`.
    pub fn try_augment(
        &self,
        observations: &[Observation],
        interval: Option<&str>,
    ) -> Result<Vec<Observation>> {
        if !self.config.enabled {
            debug!("trend augmentation disabled");
            return Ok(observations.to_vec());
        }
        self.config.validate()?;

        let window = self.config.window_size;
        if observations.len() < window {
            debug!(
                observations = observations.len(),
                window, "series shorter than rolling window, skipping"
            );
            return Ok(observations.to_vec());
        }

        let field = match detect_signal_field(observations) {
            Some(field) => field,
            None => {
                debug!("no signal field on first observation, skipping");
                return Ok(observations.to_vec());
            }
        };
        let signal = field.extract(observations)?;

        let bands = compute_bands(&signal, window);
        let mut augmented: Vec<Observation> = observations
            .iter()
            .zip(bands)
            .map(|(o, band)| o.with_bands(band))
            .collect();

        let interval = AggregationInterval::resolve(interval);
        let keys = self.next_keys(observations)?;
        let labels = format_keys(&keys, interval, self.config.timezone)?;

        let forecast = self.forecaster.forecast(&signal, self.config.horizon)?;
        debug!(
            field = field.name(),
            %interval,
            forecast = forecast.len(),
            "augmented series"
        );

        augmented.extend(
            keys.into_iter()
                .zip(labels)
                .zip(forecast)
                .map(|((key, label), point)| Observation::forecast(key, label, point)),
        );
        Ok(augmented)
    }

    fn next_keys(&self, observations: &[Observation]) -> Result<Vec<String>> {
        match observations {
            [.., second_last, last] => future_keys(&last.key, &second_last.key, self.config.horizon),
            _ => Err(TrendError::InsufficientData {
                required: 2,
                actual: observations.len(),
            }),
        }
    }
}

/// Augment with the default configuration and SARIMA forecaster.
pub fn augment(observations: &[Observation], interval: Option<&str>) -> Vec<Observation> {
    TrendAugmenter::default().augment(observations, interval)
}
