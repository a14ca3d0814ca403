//! Momentum ratios and simple percentage returns.

/// Simple percentage returns between consecutive values.
///
/// Entries with a non-finite or zero denominator are dropped, so the result
/// contains only finite returns and may be shorter than `len - 1`.
pub fn returns(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len().saturating_sub(1));
    for pair in values.windows(2) {
        let (prev, curr) = (pair[0], pair[1]);
        if prev.is_finite() && curr.is_finite() && prev != 0.0 {
            out.push(curr / prev - 1.0);
        }
    }
    out
}

/// Price momentum ratio: `(p_t - p_{t-period}) / p_{t-period}`.
///
/// Lookback: period. NaN where the reference value is unavailable or zero.
pub fn momentum_ratio(values: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "period must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    for i in period..n {
        let base = values[i - period];
        let curr = values[i];
        if base.is_finite() && curr.is_finite() && base != 0.0 {
            result[i] = (curr - base) / base;
        }
    }
    result
}
