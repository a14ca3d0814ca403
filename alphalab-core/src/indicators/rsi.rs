//! Relative Strength Index (RSI).
//!
//! Rolling-mean variant: average gain and average loss are plain rolling
//! means over the window, RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: window. Edge case: avg_loss == 0 maps to 100, never an error.

/// RSI over `window` price changes.
pub fn rsi(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window >= 1, "window must be >= 1");
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n < window + 1 {
        return result;
    }

    // Per-index gains and losses; index 0 has no change.
    let mut gains = vec![f64::NAN; n];
    let mut losses = vec![f64::NAN; n];
    for i in 1..n {
        let prev = values[i - 1];
        let curr = values[i];
        if prev.is_nan() || curr.is_nan() {
            continue;
        }
        let change = curr - prev;
        gains[i] = change.max(0.0);
        losses[i] = (-change).max(0.0);
    }

    for i in window..n {
        let gain_window = &gains[i + 1 - window..=i];
        let loss_window = &losses[i + 1 - window..=i];
        if gain_window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let avg_gain = gain_window.iter().sum::<f64>() / window as f64;
        let avg_loss = loss_window.iter().sum::<f64>() / window as f64;
        result[i] = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }
    result
}
