//! Lag polynomial arithmetic
//!
//! Polynomials are coefficient vectors in the backshift operator `B`,
//! lowest power first, with a leading 1.

/// `1 - c_1 B - ... - c_k B^k`, with each lag multiplied by `stride`.
pub fn autoregressive(coeffs: &[f64], stride: usize) -> Vec<f64> {
    lag_polynomial(coeffs, stride, -1.0)
}

/// `1 + c_1 B + ... + c_k B^k`, with each lag multiplied by `stride`.
pub fn moving_average(coeffs: &[f64], stride: usize) -> Vec<f64> {
    lag_polynomial(coeffs, stride, 1.0)
}

fn lag_polynomial(coeffs: &[f64], stride: usize, sign: f64) -> Vec<f64> {
    let mut poly = vec![0.0; coeffs.len() * stride + 1];
    poly[0] = 1.0;
    for (k, &c) in coeffs.iter().enumerate() {
        poly[(k + 1) * stride] += sign * c;
    }
    poly
}

pub fn multiply(a: &[f64], b: &[f64]) -> Vec<f64> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }
    let mut out = vec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        if x == 0.0 {
            continue;
        }
        for (j, &y) in b.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

/// `(1 - B)^d (1 - B^s)^D`
pub fn differencing(d: usize, seasonal_d: usize, period: usize) -> Vec<f64> {
    let mut poly = vec![1.0];
    for _ in 0..d {
        poly = multiply(&poly, &[1.0, -1.0]);
    }
    for _ in 0..seasonal_d {
        let mut seasonal = vec![0.0; period + 1];
        seasonal[0] = 1.0;
        seasonal[period] -= 1.0;
        poly = multiply(&poly, &seasonal);
    }
    poly
}

/// Apply a lag polynomial to a series, dropping the first `degree` points.
pub fn apply(poly: &[f64], data: &[f64]) -> Vec<f64> {
    let degree = poly.len().saturating_sub(1);
    (degree..data.len())
        .map(|t| poly.iter().enumerate().map(|(k, &c)| c * data[t - k]).sum())
        .collect()
}

/// Invert [`apply`] for values past the end of `history`.
///
/// `history` must hold at least `poly.len() - 1` points.
pub fn integrate(poly: &[f64], history: &[f64], forecasts: &[f64]) -> Vec<f64> {
    let mut extended = history.to_vec();
    for &w in forecasts {
        let t = extended.len();
        let carried: f64 = poly
            .iter()
            .enumerate()
            .skip(1)
            .map(|(k, &c)| c * extended[t - k])
            .sum();
        extended.push(w - carried);
    }
    extended.split_off(history.len())
}

/// First `count` coefficients of `ma(B) / ar(B)`.
pub fn psi_weights(ar: &[f64], ma: &[f64], count: usize) -> Vec<f64> {
    let mut psi: Vec<f64> = Vec::with_capacity(count);
    for j in 0..count {
        let mut value = ma.get(j).copied().unwrap_or(0.0);
        for i in 1..=j.min(ar.len().saturating_sub(1)) {
            value -= ar[i] * psi[j - i];
        }
        psi.push(value);
    }
    psi
}
