//! Bollinger bands — SMA ± k standard deviations.
//!
//! Lookback: window - 1. Uses the sample standard deviation of the window.

use super::moving::sma;
use super::volatility::rolling_std;

/// Upper and lower Bollinger bands over `window` values.
pub fn bollinger(values: &[f64], window: usize, num_std: f64) -> (Vec<f64>, Vec<f64>) {
    assert!(window >= 2, "window must be >= 2");
    assert!(
        num_std > 0.0 && num_std.is_finite(),
        "num_std must be positive and finite"
    );
    let mid = sma(values, window);
    let std = rolling_std(values, window);
    let n = values.len();
    let mut upper = vec![f64::NAN; n];
    let mut lower = vec![f64::NAN; n];
    for i in 0..n {
        if mid[i].is_nan() || std[i].is_nan() {
            continue;
        }
        upper[i] = mid[i] + std[i] * num_std;
        lower[i] = mid[i] - std[i] * num_std;
    }
    (upper, lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, sample_std};

    #[test]
    fn bands_bracket_the_mean() {
        let values = [10.0, 12.0, 11.0, 13.0, 12.0, 14.0];
        let (upper, lower) = bollinger(&values, 3, 2.0);
        assert!(upper[0].is_nan());
        assert!(lower[1].is_nan());

        let window = &values[3..6];
        let mid = (12.0 + 13.0 + 14.0) / 3.0;
        let std = sample_std(window);
        assert_approx(upper[5], mid + 2.0 * std, 1e-12);
        assert_approx(lower[5], mid - 2.0 * std, 1e-12);
        assert!(upper[5] > lower[5]);
    }

    #[test]
    fn constant_series_collapses_bands() {
        let values = [50.0; 10];
        let (upper, lower) = bollinger(&values, 5, 2.0);
        assert_approx(upper[9], 50.0, 1e-12);
        assert_approx(lower[9], 50.0, 1e-12);
    }

    #[test]
    #[should_panic(expected = "num_std must be positive and finite")]
    fn rejects_non_positive_multiplier() {
        bollinger(&[1.0, 2.0, 3.0], 2, 0.0);
    }
}
