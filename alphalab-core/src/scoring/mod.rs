//! Composite scoring: weighting, signal quality, ranking, and automatic
//! position-count selection.

pub mod normalize;
pub mod position_count;
pub mod rank;

pub use normalize::normalize;
pub use position_count::determine_position_count;
pub use rank::{rank_assets, RankedAsset};

use crate::config::SignalWeights;
use crate::domain::NormalizedSignals;

/// Weighted composite of the normalized signals that are present.
///
/// Absent signals contribute zero; the remaining weights are deliberately
/// not renormalized, so sparse bundles score closer to zero. The trend and
/// low-volatility channels carry no weight of their own — they participate
/// in the quality assessment only.
pub fn composite_score(norm: &NormalizedSignals, weights: &SignalWeights) -> f64 {
    let mut score = 0.0;
    if let Some(v) = norm.momentum {
        score += weights.momentum * v;
    }
    if let Some(v) = norm.value {
        score += weights.value * v;
    }
    if let Some(v) = norm.quality {
        score += weights.quality * v;
    }
    if let Some(v) = norm.volatility {
        score += weights.volatility * v;
    }
    if let Some(v) = norm.sentiment {
        score += weights.sentiment * v;
    }
    if let Some(v) = norm.event {
        score += weights.event * v;
    }
    if let Some(v) = norm.stat_arb {
        score += weights.stat_arb * v;
    }
    score
}

/// Confidence in the composite, in [0, 1].
///
/// Rewards signals that are both strong and mutually consistent: the mean
/// of (a) average absolute strength scaled and capped at 1, and (b) one
/// minus the dispersion across signals. Defaults to 0.5 with fewer than two
/// usable signals.
pub fn signal_quality(norm: &NormalizedSignals) -> f64 {
    let values = norm.present();
    if values.len() < 2 {
        return 0.5;
    }

    let strength = values.iter().map(|v| v.abs()).sum::<f64>() / values.len() as f64;
    let strength_factor = (strength * 2.0).min(1.0);

    let consistency_factor = 1.0 - population_std(&values).min(1.0);

    (strength_factor + consistency_factor) / 2.0
}

/// Population standard deviation (the dispersion of the observed bundle
/// itself, not an estimate for a wider population).
fn population_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    var.sqrt()
}
