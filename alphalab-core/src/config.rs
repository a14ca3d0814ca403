//! Engine configuration — one immutable snapshot per analysis pass.
//!
//! Everything tunable is threaded through explicit config values; there is
//! no process-wide mutable state. Each pass gets its own snapshot, and a
//! deterministic BLAKE3 `config_id` identifies it for caching and run
//! provenance.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when a configuration fails validation.
///
/// Validation runs at the boundary, before any computation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("total capital must be positive and finite, got {0}")]
    NonPositiveCapital(f64),
    #[error("signal weight '{name}' must be non-negative and finite, got {value}")]
    BadWeight { name: &'static str, value: f64 },
    #[error("signal weights must sum to 1.0 (±{tolerance}), got {sum}")]
    WeightSum { sum: f64, tolerance: f64 },
    #[error("'{name}' must be within {low}..={high}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        low: f64,
        high: f64,
    },
    #[error("lookback '{0}' must be >= 2")]
    BadLookback(&'static str),
    #[error("regime bounds must satisfy 0 < low < high, got low={low}, high={high}")]
    BadRegimeBounds { low: f64, high: f64 },
    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Per-signal composite weights.
///
/// Fixed at configuration time; the composite score is the weighted sum of
/// whichever normalized signals are present (absent signals contribute zero,
/// weights are not renormalized).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalWeights {
    pub momentum: f64,
    pub value: f64,
    pub quality: f64,
    pub volatility: f64,
    pub sentiment: f64,
    pub event: f64,
    pub stat_arb: f64,
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            momentum: 0.25,
            value: 0.15,
            quality: 0.20,
            volatility: 0.10,
            sentiment: 0.10,
            event: 0.10,
            stat_arb: 0.10,
        }
    }
}

impl SignalWeights {
    const SUM_TOLERANCE: f64 = 1e-3;

    pub fn validate(&self) -> Result<(), ConfigError> {
        let named = [
            ("momentum", self.momentum),
            ("value", self.value),
            ("quality", self.quality),
            ("volatility", self.volatility),
            ("sentiment", self.sentiment),
            ("event", self.event),
            ("stat_arb", self.stat_arb),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::BadWeight { name, value });
            }
        }
        let sum: f64 = named.iter().map(|(_, v)| v).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::WeightSum {
                sum,
                tolerance: Self::SUM_TOLERANCE,
            });
        }
        Ok(())
    }
}

/// Named rescaling constants for signal normalization.
///
/// The divisors are empirically chosen values carried over from calibration;
/// they are configuration, not derived quantities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizeParams {
    /// Factor scores have native range 0–2; divided by this onto [-1, 1].
    pub factor_scale: f64,
    /// Annualized volatility mapped via `(reference - vol) / reference`.
    pub vol_reference: f64,
    /// Spread z-scores mapped via `-z / zscore_scale` (mean reversion).
    pub zscore_scale: f64,
    /// Composite event signals have native range [-5, 5].
    pub event_scale: f64,
}

impl Default for NormalizeParams {
    fn default() -> Self {
        Self {
            factor_scale: 2.0,
            vol_reference: 0.3,
            zscore_scale: 3.0,
            event_scale: 5.0,
        }
    }
}

/// Annualized-volatility bounds for regime classification.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeBounds {
    pub low: f64,
    pub high: f64,
}

impl Default for RegimeBounds {
    fn default() -> Self {
        Self {
            low: 0.15,
            high: 0.30,
        }
    }
}

/// Cross-asset analyzer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatArbParams {
    /// Minimum return correlation for a pair to be considered.
    pub correlation_threshold: f64,
    /// Z-score above which a directional long/short call is made.
    pub directional_entry: f64,
    /// Z-score above which the divergence is tradeable without direction.
    pub pair_entry: f64,
    /// Pair enumeration is bounded to this basket prefix. A scalability
    /// bound, not a correctness requirement.
    pub max_basket_prefix: usize,
    /// Each first leg pairs with at most this many following symbols.
    pub pair_span: usize,
}

impl Default for StatArbParams {
    fn default() -> Self {
        Self {
            correlation_threshold: 0.7,
            directional_entry: 2.0,
            pair_entry: 1.5,
            max_basket_prefix: 10,
            pair_span: 5,
        }
    }
}

/// Position-count bounds and tier thresholds for automatic portfolio sizing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionLimits {
    /// Composite score above which an asset is top tier.
    pub top_tier_score: f64,
    /// Composite score above which an asset is middle tier.
    pub middle_tier_score: f64,
    /// Middle-tier slots are added only while at least this fraction of
    /// capital is projected to remain unallocated.
    pub middle_capital_fraction: f64,
    /// Lower-tier slots require this larger projected surplus.
    pub lower_capital_fraction: f64,
    pub min_positions: usize,
    pub max_positions: usize,
}

impl Default for PositionLimits {
    fn default() -> Self {
        Self {
            top_tier_score: 0.5,
            middle_tier_score: 0.3,
            middle_capital_fraction: 0.25,
            lower_capital_fraction: 0.5,
            min_positions: 5,
            max_positions: 35,
        }
    }
}

/// Immutable engine configuration for one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub lookback_short: usize,
    pub lookback_medium: usize,
    pub lookback_long: usize,
    /// Headline window (in bars) for event price-reaction checks.
    pub event_window: usize,
    /// Optional seed for score jitter used to diversify otherwise-identical
    /// ranks. `None` (the default) keeps ranking fully deterministic.
    pub tie_jitter_seed: Option<u64>,
    pub weights: SignalWeights,
    pub normalize: NormalizeParams,
    pub regime: RegimeBounds,
    pub stat_arb: StatArbParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookback_short: 20,
            lookback_medium: 50,
            lookback_long: 200,
            event_window: 5,
            tie_jitter_seed: None,
            weights: SignalWeights::default(),
            normalize: NormalizeParams::default(),
            regime: RegimeBounds::default(),
            stat_arb: StatArbParams::default(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lookback_short < 2 {
            return Err(ConfigError::BadLookback("lookback_short"));
        }
        if self.lookback_medium < 2 {
            return Err(ConfigError::BadLookback("lookback_medium"));
        }
        if self.lookback_long < 2 {
            return Err(ConfigError::BadLookback("lookback_long"));
        }
        if self.event_window == 0 {
            return Err(ConfigError::BadLookback("event_window"));
        }
        self.weights.validate()?;
        if !(self.regime.low > 0.0 && self.regime.low < self.regime.high) {
            return Err(ConfigError::BadRegimeBounds {
                low: self.regime.low,
                high: self.regime.high,
            });
        }
        check_range(
            "correlation_threshold",
            self.stat_arb.correlation_threshold,
            0.0,
            1.0,
        )?;
        if self.stat_arb.directional_entry < self.stat_arb.pair_entry {
            return Err(ConfigError::OutOfRange {
                name: "directional_entry",
                value: self.stat_arb.directional_entry,
                low: self.stat_arb.pair_entry,
                high: f64::INFINITY,
            });
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two passes with identical configs share the same id, which makes
    /// results attributable and cacheable.
    pub fn config_id(&self) -> String {
        let json = serde_json::to_string(self).expect("EngineConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("EngineConfig serialization failed")
    }
}

/// Immutable allocation configuration for one sizing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRequest {
    pub total_capital: f64,
    /// Annualized portfolio volatility target.
    pub target_volatility: f64,
    /// Maximum risk budget per position as a fraction of capital.
    pub risk_tolerance: f64,
    /// Absolute per-asset allocation ceiling as a fraction of capital.
    pub max_allocation_per_asset: f64,
    /// How much of capital is spread versus concentrated, in (0, 1].
    pub diversification_factor: f64,
    /// Quality floor below which an asset is disqualified from sizing.
    pub min_signal_quality: f64,
    /// Volatility estimates are floored here to stop runaway sizing.
    pub volatility_floor: f64,
    pub limits: PositionLimits,
}

impl Default for PortfolioRequest {
    fn default() -> Self {
        Self {
            total_capital: 100_000.0,
            target_volatility: 0.15,
            risk_tolerance: 0.02,
            max_allocation_per_asset: 0.10,
            diversification_factor: 0.5,
            min_signal_quality: 0.3,
            volatility_floor: 0.05,
            limits: PositionLimits::default(),
        }
    }
}

impl PortfolioRequest {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.total_capital.is_finite() || self.total_capital <= 0.0 {
            return Err(ConfigError::NonPositiveCapital(self.total_capital));
        }
        check_range("target_volatility", self.target_volatility, 1e-6, 10.0)?;
        check_range("risk_tolerance", self.risk_tolerance, 1e-6, 1.0)?;
        check_range(
            "max_allocation_per_asset",
            self.max_allocation_per_asset,
            1e-6,
            1.0,
        )?;
        check_range(
            "diversification_factor",
            self.diversification_factor,
            1e-6,
            1.0,
        )?;
        check_range("min_signal_quality", self.min_signal_quality, 0.0, 1.0)?;
        check_range("volatility_floor", self.volatility_floor, 1e-6, 1.0)?;
        if self.limits.max_positions == 0 {
            return Err(ConfigError::OutOfRange {
                name: "max_positions",
                value: 0.0,
                low: 1.0,
                high: f64::INFINITY,
            });
        }
        Ok(())
    }
}

fn check_range(name: &'static str, value: f64, low: f64, high: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < low || value > high {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            low,
            high,
        });
    }
    Ok(())
}
