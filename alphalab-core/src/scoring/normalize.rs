//! Rescaling of raw signals onto the common [-1, 1] scale.
//!
//! Every mapping clips into the target range; extreme inputs saturate and
//! NaN inputs mark the signal as absent rather than poisoning the
//! composite.

use crate::config::NormalizeParams;
use crate::domain::{FactorSignals, NormalizedSignals, PriceActionSignals, SentimentSignals};

/// Clip into [-1, 1]; NaN becomes "absent".
fn clip(value: f64) -> Option<f64> {
    if value.is_nan() {
        None
    } else {
        Some(value.clamp(-1.0, 1.0))
    }
}

/// Rescale one asset's raw signals using their documented native ranges.
///
/// Factor scores (native 0–2) divide by `factor_scale`; realized volatility
/// maps through `(reference - vol) / reference` so calm assets score
/// higher; sentiment is already in range; event composites (native -5..5)
/// divide by `event_scale`; spread z-scores map through `-z / zscore_scale`
/// to express mean-reversion conviction.
pub fn normalize(
    factor: &FactorSignals,
    price_action: &PriceActionSignals,
    sentiment: Option<&SentimentSignals>,
    event_signal: Option<f64>,
    stat_arb_z: Option<f64>,
    params: &NormalizeParams,
) -> NormalizedSignals {
    NormalizedSignals {
        value: clip(factor.value_score / params.factor_scale),
        quality: clip(factor.quality_score / params.factor_scale),
        volatility: clip(factor.volatility_score / params.factor_scale),
        momentum: clip(factor.momentum_score),
        trend: clip(price_action.trend_strength),
        low_vol: clip(
            (params.vol_reference - price_action.realized_volatility) / params.vol_reference,
        ),
        sentiment: sentiment.and_then(|s| clip(s.score)),
        event: event_signal.and_then(|e| clip(e / params.event_scale)),
        stat_arb: stat_arb_z.and_then(|z| clip(-z / params.zscore_scale)),
    }
}
