//! Volatility regime detection from trailing realized volatility.

use crate::config::EngineConfig;
use crate::domain::{PriceSeries, VolatilityRegime};
use crate::indicators::annualized_volatility;

/// Neutral volatility assumed when history is too short to measure.
pub const DEFAULT_REALIZED_VOL: f64 = 0.2;

/// Regime classification together with the measured volatility behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegimeSnapshot {
    pub regime: VolatilityRegime,
    pub realized_vol: f64,
}

/// Classify the trailing annualized realized volatility of a series.
///
/// Falls back to a Normal regime at the default volatility when fewer than
/// `lookback_short` return observations exist.
pub fn detect_volatility_regime(series: &PriceSeries, config: &EngineConfig) -> RegimeSnapshot {
    let returns = series.returns();
    let realized_vol = annualized_volatility(&returns, config.lookback_short)
        .last()
        .copied()
        .filter(|v| v.is_finite())
        .unwrap_or(DEFAULT_REALIZED_VOL);
    RegimeSnapshot {
        regime: VolatilityRegime::classify(realized_vol, config.regime.low, config.regime.high),
        realized_vol,
    }
}
