//! Indicator library — stateless numeric transforms over price series.
//!
//! Series-shaped outputs are the same length as their input with `f64::NAN`
//! during window warm-up; scalar outputs document a neutral default for
//! short inputs. No function raises on short or degenerate data, and no
//! value at index `i` depends on observations after `i`.

pub mod bollinger;
pub mod momentum;
pub mod moving;
pub mod risk;
pub mod rsi;
pub mod stats;
pub mod volatility;

pub use bollinger::bollinger;
pub use momentum::{momentum_ratio, returns};
pub use moving::{ema, sma};
pub use risk::{max_drawdown, sharpe, sortino, value_at_risk, DAILY_RISK_FREE};
pub use rsi::rsi;
pub use stats::{mean, sample_std};
pub use volatility::{annualized_volatility, rolling_skew, rolling_std, ANNUALIZATION};

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
