//! Per-asset signal computers: factor scores, momentum, volatility regime,
//! price action.
//!
//! Every computation degrades to a documented neutral default when history
//! or fundamentals are missing; nothing in this module returns an error.

pub mod factor;
pub mod momentum;
pub mod price_action;
pub mod regime;

pub use factor::{compute_factor_signals, quality_score, value_score};
pub use momentum::{momentum_score, momentum_snapshot, MomentumSnapshot};
pub use price_action::compute_price_action;
pub use regime::{detect_volatility_regime, RegimeSnapshot};

/// Build a series of daily bars from close prices for testing.
#[cfg(test)]
pub(crate) fn make_series(closes: &[f64]) -> crate::domain::PriceSeries {
    use crate::domain::{Bar, PriceSeries};
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
                adj_close: close,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}
