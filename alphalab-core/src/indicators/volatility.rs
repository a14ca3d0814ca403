//! Rolling dispersion measures: standard deviation, annualized volatility,
//! skewness.

use super::stats::{mean, sample_std};

/// Trading days per year used for annualization.
pub const ANNUALIZATION: f64 = 252.0;

/// Rolling sample standard deviation over `window` values.
///
/// Lookback: window - 1. NaN inside the window yields NaN at that index.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 2, "window must be >= 2");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = sample_std(slice);
    }
    result
}

/// Annualized rolling volatility of a return series:
/// `rolling_std * sqrt(252)`.
pub fn annualized_volatility(returns: &[f64], window: usize) -> Vec<f64> {
    rolling_std(returns, window)
        .into_iter()
        .map(|v| v * ANNUALIZATION.sqrt())
        .collect()
}

/// Rolling sample skewness (adjusted Fisher-Pearson) over `window` values.
///
/// Lookback: window - 1; windows smaller than 3 observations or with zero
/// dispersion yield NaN.
pub fn rolling_skew(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 3, "window must be >= 3");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in (window - 1)..n {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().any(|v| v.is_nan()) {
            continue;
        }
        result[i] = skewness(slice);
    }
    result
}

/// Adjusted Fisher-Pearson sample skewness:
/// `n / ((n-1)(n-2)) * Σ((x - x̄) / s)³`.
fn skewness(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 3 {
        return f64::NAN;
    }
    let m = mean(values);
    let s = sample_std(values);
    if !s.is_finite() || s == 0.0 {
        return f64::NAN;
    }
    let cubed: f64 = values.iter().map(|v| ((v - m) / s).powi(3)).sum();
    let nf = n as f64;
    nf / ((nf - 1.0) * (nf - 2.0)) * cubed
}
