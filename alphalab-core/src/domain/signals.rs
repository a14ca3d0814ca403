//! Typed signal bundles.
//!
//! Each producer documents its native range so the normalizer can rescale
//! deterministically. Bundles are explicit records rather than string-keyed
//! maps: which signals exist is a compile-time fact, and "absent" is an
//! `Option`, not a missing key.

use serde::{Deserialize, Serialize};

/// Factor-style scores. Native ranges: value/quality/volatility 0–2,
/// momentum 0–1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FactorSignals {
    pub value_score: f64,
    pub quality_score: f64,
    pub volatility_score: f64,
    pub momentum_score: f64,
}

/// Price-action predictors.
///
/// `trend_strength` is binary (0/1), `realized_volatility` annualized,
/// `rolling_skew` unbounded, `bb_position` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceActionSignals {
    pub trend_strength: f64,
    pub realized_volatility: f64,
    pub rolling_skew: f64,
    pub bb_position: f64,
}

impl Default for PriceActionSignals {
    /// Neutral defaults for series too short to analyze.
    fn default() -> Self {
        Self {
            trend_strength: 0.0,
            realized_volatility: 0.2,
            rolling_skew: 0.0,
            bb_position: 0.5,
        }
    }
}

/// Aggregate headline sentiment. `score` in [-1, 1]; `strength` is the
/// dispersion across headlines; `momentum` is recent minus older average.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentSignals {
    pub score: f64,
    pub strength: f64,
    pub momentum: f64,
}

/// Signals rescaled onto the common [-1, 1] scale.
///
/// `None` means the underlying signal could not be computed for this asset;
/// absent signals contribute zero to the composite without renormalizing
/// the remaining weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSignals {
    pub value: Option<f64>,
    pub quality: Option<f64>,
    pub volatility: Option<f64>,
    pub momentum: Option<f64>,
    pub trend: Option<f64>,
    pub low_vol: Option<f64>,
    pub sentiment: Option<f64>,
    pub event: Option<f64>,
    pub stat_arb: Option<f64>,
}

impl NormalizedSignals {
    /// Values of the signals that are present, in declaration order.
    pub fn present(&self) -> Vec<f64> {
        [
            self.value,
            self.quality,
            self.volatility,
            self.momentum,
            self.trend,
            self.low_vol,
            self.sentiment,
            self.event,
            self.stat_arb,
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Per-asset signal breakdown retained alongside the composite score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalBreakdown {
    pub factor: FactorSignals,
    pub price_action: PriceActionSignals,
    pub sentiment: Option<SentimentSignals>,
    /// Regime-filtered composite event signal, native range [-5, 5].
    pub event_signal: Option<f64>,
    /// Mean spread z-score of this asset's correlated pairs, if any.
    pub stat_arb_z: Option<f64>,
    pub normalized: NormalizedSignals,
}

/// Final per-asset result of one analysis pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetScore {
    pub composite_score: f64,
    /// Confidence in the composite, in [0, 1]. Below the configured floor
    /// the asset is disqualified from sizing regardless of score.
    pub signal_quality: f64,
    pub breakdown: SignalBreakdown,
}

impl AssetScore {
    /// Ranking key: conviction discounted by confidence.
    pub fn rank_key(&self) -> f64 {
        self.composite_score * self.signal_quality
    }
}
