//! Moving averages — simple and exponential.
//!
//! Lookback: window - 1 (first valid value at index window-1).

/// Simple moving average over `window` values.
///
/// Rolls the window sum forward in O(n); any NaN inside the current window
/// yields NaN at that index.
pub fn sma(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < window {
        return result;
    }

    let mut sum = 0.0;
    let mut nan_in_window = false;
    for &v in values.iter().take(window) {
        if v.is_nan() {
            nan_in_window = true;
        }
        sum += v;
    }
    if !nan_in_window {
        result[window - 1] = sum / window as f64;
    }

    for i in window..n {
        let leaving = values[i - window];
        let entering = values[i];
        sum = sum - leaving + entering;

        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            // Rescan the window; the incremental sum is poisoned.
            nan_in_window = false;
            sum = 0.0;
            for &v in &values[(i + 1 - window)..=i] {
                if v.is_nan() {
                    nan_in_window = true;
                }
                sum += v;
            }
            if nan_in_window {
                continue;
            }
        }
        result[i] = sum / window as f64;
    }
    result
}

/// Exponential moving average with span semantics (`alpha = 2 / (window+1)`).
///
/// Seeded with the SMA of the first window; recursive thereafter. A NaN
/// input poisons the remainder of the series.
pub fn ema(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < window {
        return result;
    }

    let seed_window = &values[..window];
    if seed_window.iter().any(|v| v.is_nan()) {
        return result;
    }
    let mut current = seed_window.iter().sum::<f64>() / window as f64;
    result[window - 1] = current;

    let alpha = 2.0 / (window as f64 + 1.0);
    for i in window..n {
        if values[i].is_nan() {
            return result;
        }
        current = alpha * values[i] + (1.0 - alpha) * current;
        result[i] = current;
    }
    result
}
