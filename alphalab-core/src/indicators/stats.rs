//! Shared scalar statistics used across the indicator library.

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). Returns NaN for fewer than 2 values.
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    (ss / (n - 1) as f64).sqrt()
}

/// Empirical percentile with linear interpolation between order statistics.
///
/// `q` is in [0, 100]. Returns NaN for an empty slice.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted: Vec<f64> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN in percentile input"));
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let rank = (q / 100.0).clamp(0.0, 1.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }
    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn mean_basic() {
        assert_approx(mean(&[1.0, 2.0, 3.0]), 2.0, DEFAULT_EPSILON);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn sample_std_basic() {
        // Variance of [2, 4, 4, 4, 5, 5, 7, 9] with ddof=1 is 32/7.
        let std = sample_std(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_approx(std, (32.0f64 / 7.0).sqrt(), 1e-12);
    }

    #[test]
    fn sample_std_needs_two_values() {
        assert!(sample_std(&[1.0]).is_nan());
        assert!(sample_std(&[]).is_nan());
    }

    #[test]
    fn percentile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        assert_approx(percentile(&values, 0.0), 1.0, DEFAULT_EPSILON);
        assert_approx(percentile(&values, 100.0), 4.0, DEFAULT_EPSILON);
        assert_approx(percentile(&values, 50.0), 2.5, DEFAULT_EPSILON);
        // 5th percentile of 4 values: rank 0.15 → 1.0 + 0.15 * 1.0
        assert_approx(percentile(&values, 5.0), 1.15, DEFAULT_EPSILON);
    }

    #[test]
    fn percentile_single_value() {
        assert_approx(percentile(&[42.0], 37.0), 42.0, DEFAULT_EPSILON);
    }
}
