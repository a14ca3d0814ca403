//! CorrelationPair — a highly correlated pair with its spread z-score.

use serde::{Deserialize, Serialize};

/// Classification of a correlated pair's current spread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairClass {
    /// Spread stretched high: short the first leg, long the second.
    LongShort,
    /// Spread stretched low: long the first leg, short the second.
    ShortLong,
    /// Divergence large enough to trade but without a directional call.
    PairTrade,
    Neutral,
}

impl PairClass {
    /// Classify a spread z-score against the directional and pair-trade
    /// entry thresholds (`directional_entry >= pair_entry`).
    pub fn classify(z: f64, directional_entry: f64, pair_entry: f64) -> Self {
        if z > directional_entry {
            Self::LongShort
        } else if z < -directional_entry {
            Self::ShortLong
        } else if z.abs() > pair_entry {
            Self::PairTrade
        } else {
            Self::Neutral
        }
    }

    pub fn is_tradeable(self) -> bool {
        !matches!(self, Self::Neutral)
    }
}

/// A correlated pair and its current spread state. Recomputed each pass,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub symbol_a: String,
    pub symbol_b: String,
    pub correlation: f64,
    pub spread_z: f64,
    pub classification: PairClass,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_directional() {
        assert_eq!(PairClass::classify(2.3, 2.0, 1.5), PairClass::LongShort);
        assert_eq!(PairClass::classify(-2.3, 2.0, 1.5), PairClass::ShortLong);
    }

    #[test]
    fn classify_pair_trade_band() {
        assert_eq!(PairClass::classify(1.7, 2.0, 1.5), PairClass::PairTrade);
        assert_eq!(PairClass::classify(-1.7, 2.0, 1.5), PairClass::PairTrade);
    }

    #[test]
    fn classify_neutral() {
        assert_eq!(PairClass::classify(0.4, 2.0, 1.5), PairClass::Neutral);
        assert!(!PairClass::classify(0.4, 2.0, 1.5).is_tradeable());
    }

    #[test]
    fn tradeable_covers_all_non_neutral() {
        assert!(PairClass::LongShort.is_tradeable());
        assert!(PairClass::ShortLong.is_tradeable());
        assert!(PairClass::PairTrade.is_tradeable());
    }
}
