//! Risk-adjusted return metrics: Sharpe, Sortino, value-at-risk, drawdown.
//!
//! All metrics are scalar functions of a close-price series. Short inputs
//! return the documented neutral default instead of raising.

use super::momentum::returns;
use super::stats::{mean, percentile, sample_std};

/// Default daily risk-free rate (~2% annual / 252).
pub const DAILY_RISK_FREE: f64 = 0.00008;

/// Floor for the Sortino downside-deviation denominator.
const DOWNSIDE_EPSILON: f64 = 1e-3;

/// Sharpe ratio of daily excess returns.
///
/// Returns 0.0 with fewer than 2 return observations or zero variance.
pub fn sharpe(closes: &[f64], risk_free_daily: f64) -> f64 {
    let excess: Vec<f64> = returns(closes)
        .into_iter()
        .map(|r| r - risk_free_daily)
        .collect();
    if excess.len() < 2 {
        return 0.0;
    }
    let std = sample_std(&excess);
    if !std.is_finite() || std <= 0.0 {
        return 0.0;
    }
    mean(&excess) / std
}

/// Sortino ratio: mean excess return over downside deviation.
///
/// Returns 0.0 with fewer than 2 return observations. The downside
/// deviation is floored at a small epsilon so an all-positive history
/// yields a large finite ratio rather than a division by zero.
pub fn sortino(closes: &[f64], risk_free_daily: f64) -> f64 {
    let excess: Vec<f64> = returns(closes)
        .into_iter()
        .map(|r| r - risk_free_daily)
        .collect();
    if excess.len() < 2 {
        return 0.0;
    }
    let downside: Vec<f64> = excess.iter().copied().filter(|r| *r < 0.0).collect();
    let downside_std = sample_std(&downside);
    let denom = if downside_std.is_finite() && downside_std > DOWNSIDE_EPSILON {
        downside_std
    } else {
        DOWNSIDE_EPSILON
    };
    mean(&excess) / denom
}

/// Empirical value-at-risk at the given confidence level.
///
/// The `(1 - confidence)` percentile of daily returns (a negative number in
/// a losing tail). Returns 0.0 with fewer than 10 return observations.
pub fn value_at_risk(closes: &[f64], confidence: f64) -> f64 {
    assert!(
        (0.0..1.0).contains(&(1.0 - confidence)),
        "confidence must be in (0, 1)"
    );
    let r = returns(closes);
    if r.len() < 10 {
        return 0.0;
    }
    percentile(&r, (1.0 - confidence) * 100.0)
}

/// Maximum drawdown: the most negative peak-to-trough fraction.
///
/// Returns 0.0 for empty input or a series that never declines.
pub fn max_drawdown(closes: &[f64]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0f64;
    for &c in closes {
        if !c.is_finite() {
            continue;
        }
        if c > peak {
            peak = c;
        }
        if peak > 0.0 {
            worst = worst.min((c - peak) / peak);
        }
    }
    worst
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;

    #[test]
    fn sharpe_short_series_is_zero() {
        assert_eq!(sharpe(&[100.0], DAILY_RISK_FREE), 0.0);
        assert_eq!(sharpe(&[100.0, 101.0], DAILY_RISK_FREE), 0.0);
    }

    #[test]
    fn sharpe_zero_variance_is_zero() {
        // Constant returns: std = 0.
        let closes = [100.0, 110.0, 121.0, 133.1];
        assert_eq!(sharpe(&closes, DAILY_RISK_FREE), 0.0);
    }

    #[test]
    fn sharpe_positive_for_uptrend() {
        let closes = [100.0, 102.0, 103.0, 106.0, 107.0, 110.0];
        assert!(sharpe(&closes, DAILY_RISK_FREE) > 0.0);
    }

    #[test]
    fn sortino_short_series_is_zero() {
        assert_eq!(sortino(&[100.0, 101.0], DAILY_RISK_FREE), 0.0);
    }

    #[test]
    fn sortino_no_downside_uses_floor() {
        let closes = [100.0, 101.0, 102.0, 103.0];
        let s = sortino(&closes, DAILY_RISK_FREE);
        assert!(s.is_finite());
        assert!(s > 0.0);
    }

    #[test]
    fn sortino_penalizes_downside() {
        let smooth = [100.0, 101.0, 102.0, 103.0, 104.0, 105.0];
        // Dispersed losses: the downside deviation is well above the floor.
        let choppy = [100.0, 106.0, 95.0, 107.0, 98.0, 105.0];
        assert!(
            sortino(&smooth, DAILY_RISK_FREE) > sortino(&choppy, DAILY_RISK_FREE)
        );
    }

    #[test]
    fn var_short_series_is_zero() {
        let closes = [100.0, 101.0, 99.0, 102.0];
        assert_eq!(value_at_risk(&closes, 0.95), 0.0);
    }

    #[test]
    fn var_is_a_lower_tail_return() {
        // 11 closes → 10 returns, one of them a large loss.
        let closes = [
            100.0, 101.0, 102.0, 103.0, 104.0, 94.0, 95.0, 96.0, 97.0, 98.0, 99.0,
        ];
        let var = value_at_risk(&closes, 0.95);
        assert!(var < 0.0);
    }

    #[test]
    fn max_drawdown_basic() {
        // Peak 120, trough 90 → -0.25.
        let closes = [100.0, 120.0, 90.0, 110.0];
        assert_approx(max_drawdown(&closes), -0.25, 1e-12);
    }

    #[test]
    fn max_drawdown_monotonic_rise_is_zero() {
        assert_eq!(max_drawdown(&[100.0, 110.0, 120.0]), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }
}
