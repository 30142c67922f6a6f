//! Confidence interval helpers
//!
//! Turns point forecasts and their standard errors into bounded forecasts.

use trend_spi::ForecastPoint;

/// Bounds `mid ± z * se` for each step.
pub fn from_standard_errors(
    forecast: &[f64],
    std_errors: &[f64],
    confidence_level: f64,
) -> Vec<ForecastPoint> {
    let z = z_score(confidence_level);

    forecast
        .iter()
        .zip(std_errors.iter())
        .map(|(&f, &se)| ForecastPoint::around(f, z * se))
        .collect()
}

/// Two-sided critical value for a confidence level in (0, 1).
pub fn z_score(confidence_level: f64) -> f64 {
    normal_quantile(0.5 + confidence_level / 2.0)
}

/// Standard normal quantile function (inverse CDF), rational approximation.
pub fn normal_quantile(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    let a = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    let b = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    let c = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    let d = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    let p_low = 0.02425;
    let p_high = 1.0 - p_low;

    let tail = |q: f64| {
        (((((c[0] * q + c[1]) * q + c[2]) * q + c[3]) * q + c[4]) * q + c[5])
            / ((((d[0] * q + d[1]) * q + d[2]) * q + d[3]) * q + 1.0)
    };

    if p < p_low {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= p_high {
        let q = p - 0.5;
        let r = q * q;
        (((((a[0] * r + a[1]) * r + a[2]) * r + a[3]) * r + a[4]) * r + a[5]) * q
            / (((((b[0] * r + b[1]) * r + b[2]) * r + b[3]) * r + b[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}
