//! Momentum snapshot: trend-persistence counting plus moving-average
//! proximity.

use crate::config::EngineConfig;
use crate::domain::PriceSeries;
use crate::indicators::sma;

/// Trend-persistence state of one series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MomentumSnapshot {
    /// Count in 0..=4: close above the short/medium/long averages, plus the
    /// short average above the medium one.
    pub strength: u8,
    /// Fractional distance of the close above the short average (0 when the
    /// average is unavailable).
    pub above_short: f64,
    /// Fractional distance of the close above the medium average.
    pub above_medium: f64,
}

/// Measure trend persistence against the configured lookback averages.
pub fn momentum_snapshot(series: &PriceSeries, config: &EngineConfig) -> MomentumSnapshot {
    let closes = series.closes();
    let last = match closes.last().copied().filter(|c| c.is_finite()) {
        Some(c) => c,
        None => return MomentumSnapshot::default(),
    };

    let last_sma = |window: usize| -> Option<f64> {
        sma(&closes, window).last().copied().filter(|v| v.is_finite())
    };
    let sma_short = last_sma(config.lookback_short);
    let sma_medium = last_sma(config.lookback_medium);
    let sma_long = last_sma(config.lookback_long);

    let mut strength = 0u8;
    if sma_short.is_some_and(|s| last > s) {
        strength += 1;
    }
    if sma_medium.is_some_and(|s| last > s) {
        strength += 1;
    }
    if sma_long.is_some_and(|s| last > s) {
        strength += 1;
    }
    if let (Some(short), Some(medium)) = (sma_short, sma_medium) {
        if short > medium {
            strength += 1;
        }
    }

    let proximity = |avg: Option<f64>| -> f64 {
        match avg {
            Some(a) if a > 0.0 => last / a - 1.0,
            _ => 0.0,
        }
    };

    MomentumSnapshot {
        strength,
        above_short: proximity(sma_short),
        above_medium: proximity(sma_medium),
    }
}

/// Blend the snapshot into a bounded momentum score in [0, 1].
///
/// Base credit `min(strength/4, 1) * 0.4`, plus proximity bonuses for the
/// close trading meaningfully above its short and medium averages.
pub fn momentum_score(snapshot: &MomentumSnapshot) -> f64 {
    let mut score = (snapshot.strength as f64 / 4.0).min(1.0) * 0.4;

    if snapshot.above_short > 0.05 {
        score += 0.3;
    } else if snapshot.above_short > 0.02 {
        score += 0.2;
    }

    if snapshot.above_medium > 0.10 {
        score += 0.3;
    } else if snapshot.above_medium > 0.05 {
        score += 0.15;
    }

    score.min(1.0)
}
