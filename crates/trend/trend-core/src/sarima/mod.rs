//! Seasonal ARIMA implementation
//!
//! SARIMA `(p, d, q)(P, D, Q)[s]` models extend ARIMA with multiplicative
//! seasonal terms:
//!
//! ```text
//! φ(B) Φ(B^s) (1 - B)^d (1 - B^s)^D y_t = θ(B) Θ(B^s) e_t
//! ```
//!
//! Coefficients are estimated by conditional sum of squares (CSS): residuals
//! are computed forward from the first point with every pre-sample value and
//! residual taken as zero, and the sum of their squares is minimized with a
//! Nelder-Mead simplex. Each coefficient is searched as `tanh(u)` so it stays
//! inside (-1, 1). CSS is fast and approximate, which suits refitting on every
//! call rather than once offline.
//!
//! ## Example
//!
//! ```rust
//! use trend_api::{SarimaConfig, SarimaOrder};
//! use trend_core::Sarima;
//!
//! let data: Vec<f64> = (0..60).map(|i| 10.0 + (i % 7) as f64).collect();
//! let config = SarimaConfig {
//!     order: SarimaOrder::new(1, 0, 0).with_seasonal(1, 0, 0, 7),
//!     ..SarimaConfig::default()
//! };
//! let mut model = Sarima::new(config).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.forecast_with_confidence(7, 0.95).unwrap();
//! assert_eq!(forecast.len(), 7);
//! ```

mod optimizer;
mod polynomial;
mod series;

pub use optimizer::{Minimum, NelderMead};
pub use series::SignalSeries;

use tracing::debug;
use trend_api::{SarimaConfig, SarimaOrder, TrendConfig};
use trend_spi::{ForecastPoint, Result, SignalForecaster, TrendError};

use crate::confidence;

/// Seasonal ARIMA model fitted by conditional sum of squares
#[derive(Debug, Clone)]
pub struct Sarima {
    config: SarimaConfig,
    /// Non-seasonal AR coefficients (φ)
    ar_coeffs: Vec<f64>,
    /// Seasonal AR coefficients (Φ)
    seasonal_ar_coeffs: Vec<f64>,
    /// Non-seasonal MA coefficients (θ)
    ma_coeffs: Vec<f64>,
    /// Seasonal MA coefficients (Θ)
    seasonal_ma_coeffs: Vec<f64>,
    /// Expanded `φ(B)Φ(B^s)`
    ar_poly: Vec<f64>,
    /// Expanded `θ(B)Θ(B^s)`
    ma_poly: Vec<f64>,
    /// `(1 - B)^d (1 - B^s)^D`
    diff_poly: Vec<f64>,
    /// Mean removed before fitting (zero when differencing)
    mean: f64,
    original_data: Vec<f64>,
    /// Differenced, mean-removed series the ARMA part is fitted on
    centered: Vec<f64>,
    residuals: Vec<f64>,
    /// Innovation variance estimate
    sigma2: f64,
    iterations: usize,
    converged: bool,
    fitted: bool,
}

impl Sarima {
    pub fn new(config: SarimaConfig) -> Result<Self> {
        let order = config.order;
        if order.is_seasonal() && order.period == 0 {
            return Err(TrendError::InvalidParameter {
                name: "period".to_string(),
                reason: "seasonal orders require a period of at least 1".to_string(),
            });
        }

        Ok(Self {
            ar_coeffs: vec![0.0; order.p],
            seasonal_ar_coeffs: vec![0.0; order.seasonal_p],
            ma_coeffs: vec![0.0; order.q],
            seasonal_ma_coeffs: vec![0.0; order.seasonal_q],
            ar_poly: vec![1.0],
            ma_poly: vec![1.0],
            diff_poly: polynomial::differencing(order.d, order.seasonal_d, order.period),
            mean: 0.0,
            original_data: Vec::new(),
            centered: Vec::new(),
            residuals: Vec::new(),
            sigma2: 0.0,
            iterations: 0,
            converged: false,
            fitted: false,
            config,
        })
    }

    pub fn fit(&mut self, data: &[f64]) -> Result<()> {
        if data.iter().any(|x| !x.is_finite()) {
            return Err(TrendError::ModelFit(
                "history contains NaN or infinite values".to_string(),
            ));
        }

        let required = self.diff_poly.len();
        if data.len() < required {
            return Err(TrendError::InsufficientData {
                required,
                actual: data.len(),
            });
        }

        let order = self.config.order;
        let differenced = polynomial::apply(&self.diff_poly, data);
        self.mean = if order.d + order.seasonal_d == 0 {
            differenced.iter().sum::<f64>() / differenced.len() as f64
        } else {
            0.0
        };
        let centered: Vec<f64> = differenced.iter().map(|w| w - self.mean).collect();

        let objective = |u: &[f64]| {
            let coeffs = Coefficients::decode(&order, u);
            let (ar_poly, ma_poly) = coeffs.expand(order.period);
            css_residuals(&centered, &ar_poly, &ma_poly)
                .iter()
                .map(|e| e * e)
                .sum::<f64>()
        };
        let start = vec![0.0; order.parameter_count()];
        let minimum = NelderMead::new(self.config.max_iterations, self.config.tolerance)
            .minimize(objective, &start);

        if !minimum.value.is_finite() {
            return Err(TrendError::ModelFit(
                "conditional sum of squares diverged".to_string(),
            ));
        }

        let coeffs = Coefficients::decode(&order, &minimum.point);
        let (ar_poly, ma_poly) = coeffs.expand(order.period);
        let residuals = css_residuals(&centered, &ar_poly, &ma_poly);
        let sse: f64 = residuals.iter().map(|e| e * e).sum();

        self.ar_coeffs = coeffs.ar;
        self.seasonal_ar_coeffs = coeffs.seasonal_ar;
        self.ma_coeffs = coeffs.ma;
        self.seasonal_ma_coeffs = coeffs.seasonal_ma;
        self.ar_poly = ar_poly;
        self.ma_poly = ma_poly;
        self.sigma2 = sse / centered.len() as f64;
        self.original_data = data.to_vec();
        self.centered = centered;
        self.residuals = residuals;
        self.iterations = minimum.iterations;
        self.converged = minimum.converged;
        self.fitted = true;

        debug!(
            observations = data.len(),
            iterations = minimum.iterations,
            converged = minimum.converged,
            sigma2 = self.sigma2,
            "fitted SARIMA by conditional sum of squares"
        );
        Ok(())
    }

    /// Point forecasts for the next `steps` points.
    pub fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(TrendError::NotFitted);
        }
        if steps == 0 {
            return Ok(Vec::new());
        }

        let n = self.centered.len();
        let mut extended = self.centered.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let t = extended.len();
            let mut forecast = 0.0;

            // AR component
            for (lag, &c) in self.ar_poly.iter().enumerate().skip(1).take(t) {
                forecast -= c * extended[t - lag];
            }

            // MA component
            for (lag, &m) in self.ma_poly.iter().enumerate().skip(1).take(t) {
                forecast += m * extended_residuals[t - lag];
            }

            extended.push(forecast);
            extended_residuals.push(0.0); // Future residuals are 0
        }

        let differenced: Vec<f64> = extended[n..].iter().map(|x| x + self.mean).collect();
        Ok(polynomial::integrate(&self.diff_poly, &self.original_data, &differenced))
    }

    /// Forecasts bounded by a `confidence_level` prediction interval.
    pub fn forecast_with_confidence(
        &self,
        steps: usize,
        confidence_level: f64,
    ) -> Result<Vec<ForecastPoint>> {
        let forecast = self.forecast(steps)?;

        let full_ar = polynomial::multiply(&self.ar_poly, &self.diff_poly);
        let psi = polynomial::psi_weights(&full_ar, &self.ma_poly, steps);
        let std_errors: Vec<f64> = psi
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w * w;
                Some((self.sigma2 * *acc).sqrt())
            })
            .collect();

        let points = confidence::from_standard_errors(&forecast, &std_errors, confidence_level);
        if let Some(step) = points.iter().position(|p| !p.is_finite()) {
            return Err(TrendError::NumericalError(format!(
                "forecast step {} is not finite",
                step + 1
            )));
        }
        Ok(points)
    }

    pub fn order(&self) -> SarimaOrder {
        self.config.order
    }

    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    pub fn seasonal_ar_coefficients(&self) -> &[f64] {
        &self.seasonal_ar_coeffs
    }

    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    pub fn seasonal_ma_coefficients(&self) -> &[f64] {
        &self.seasonal_ma_coeffs
    }

    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Simplex iterations used by the last fit
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Whether the last fit met its tolerance before the iteration cap
    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }
}

/// Coefficient sets decoded from an optimizer point `[φ | Φ | θ | Θ]`
struct Coefficients {
    ar: Vec<f64>,
    seasonal_ar: Vec<f64>,
    ma: Vec<f64>,
    seasonal_ma: Vec<f64>,
}

impl Coefficients {
    fn decode(order: &SarimaOrder, u: &[f64]) -> Self {
        let mut values = u.iter().map(|x| x.tanh());
        let mut take = |k: usize| values.by_ref().take(k).collect::<Vec<f64>>();
        Self {
            ar: take(order.p),
            seasonal_ar: take(order.seasonal_p),
            ma: take(order.q),
            seasonal_ma: take(order.seasonal_q),
        }
    }

    fn expand(&self, period: usize) -> (Vec<f64>, Vec<f64>) {
        let ar = polynomial::multiply(
            &polynomial::autoregressive(&self.ar, 1),
            &polynomial::autoregressive(&self.seasonal_ar, period),
        );
        let ma = polynomial::multiply(
            &polynomial::moving_average(&self.ma, 1),
            &polynomial::moving_average(&self.seasonal_ma, period),
        );
        (ar, ma)
    }
}

/// Residuals of `ar(B) x_t = ma(B) e_t` with zero pre-sample values.
fn css_residuals(x: &[f64], ar_poly: &[f64], ma_poly: &[f64]) -> Vec<f64> {
    let mut residuals = vec![0.0; x.len()];
    for t in 0..x.len() {
        let mut e = x[t];
        for (lag, &c) in ar_poly.iter().enumerate().skip(1).take(t) {
            e += c * x[t - lag];
        }
        for (lag, &m) in ma_poly.iter().enumerate().skip(1).take(t) {
            e -= m * residuals[t - lag];
        }
        residuals[t] = e;
    }
    residuals
}

/// [`SignalForecaster`] backed by a freshly fitted [`Sarima`] per call.
#[derive(Debug, Clone)]
pub struct SarimaForecaster {
    config: SarimaConfig,
    confidence_level: f64,
}

impl SarimaForecaster {
    pub fn new(config: SarimaConfig, confidence_level: f64) -> Self {
        Self {
            config,
            confidence_level,
        }
    }

    pub fn from_config(config: &TrendConfig) -> Self {
        Self::new(config.sarima.clone(), config.confidence_level)
    }
}

impl Default for SarimaForecaster {
    fn default() -> Self {
        Self::from_config(&TrendConfig::default())
    }
}

impl SignalForecaster for SarimaForecaster {
    fn forecast(&self, history: &[f64], horizon: usize) -> Result<Vec<ForecastPoint>> {
        if history.len() < self.min_history() {
            debug!(
                history = history.len(),
                required = self.min_history(),
                "not enough history to forecast"
            );
            return Ok(Vec::new());
        }
        if horizon == 0 {
            return Ok(Vec::new());
        }

        let series = SignalSeries::daily_ending_now(history);
        debug!(
            start = ?series.start(),
            end = %series.end(),
            until = ?series.forecast_timestamps(horizon).last().copied(),
            horizon,
            "forecasting anchored daily series"
        );

        let mut model = Sarima::new(self.config.clone())?;
        model.fit(series.values())?;
        model.forecast_with_confidence(horizon, self.confidence_level)
    }

    fn min_history(&self) -> usize {
        let order = self.config.order;
        let differencing = order.d + order.seasonal_d * order.period;
        order.p.max(differencing + 1)
    }
}
