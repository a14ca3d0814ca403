//! Price-action predictors: trend state, realized volatility, skew, and
//! Bollinger band position.

use crate::config::EngineConfig;
use crate::domain::{PriceActionSignals, PriceSeries};
use crate::indicators::{bollinger, rolling_skew, sma};
use crate::signals::regime::detect_volatility_regime;

/// Compute the price-action bundle for one series.
///
/// Each component falls back to its neutral default (trend 0, volatility
/// 0.2, skew 0, band position 0.5) when history is too short.
pub fn compute_price_action(series: &PriceSeries, config: &EngineConfig) -> PriceActionSignals {
    let closes = series.closes();
    let mut signals = PriceActionSignals::default();

    // Trend: close above short average above medium average.
    if closes.len() > config.lookback_medium {
        let short = sma(&closes, config.lookback_short).last().copied();
        let medium = sma(&closes, config.lookback_medium).last().copied();
        if let (Some(last), Some(s), Some(m)) = (closes.last().copied(), short, medium) {
            if last.is_finite() && s.is_finite() && m.is_finite() && last > s && s > m {
                signals.trend_strength = 1.0;
            }
        }
    }

    signals.realized_volatility = detect_volatility_regime(series, config).realized_vol;

    let returns = series.returns();
    if returns.len() > config.lookback_short {
        if let Some(&skew) = rolling_skew(&returns, config.lookback_short).last() {
            if skew.is_finite() {
                signals.rolling_skew = skew;
            }
        }
    }

    if closes.len() > config.lookback_short {
        let (upper, lower) = bollinger(&closes, config.lookback_short, 2.0);
        if let (Some(last), Some(&u), Some(&l)) =
            (closes.last().copied(), upper.last(), lower.last())
        {
            let width = u - l;
            // Zero-width bands (flat window) stay at the neutral midpoint.
            if width.is_finite() && width > 0.0 && last.is_finite() {
                signals.bb_position = ((last - l) / width).clamp(0.0, 1.0);
            }
        }
    }

    signals
}
