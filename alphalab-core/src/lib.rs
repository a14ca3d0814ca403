//! AlphaLab Core — signal aggregation and risk-constrained position sizing.
//!
//! This crate contains the computation-only heart of the system:
//! - Domain types (bars, series, fundamentals, headlines, scores, pairs,
//!   positions)
//! - Indicator library (moving averages, RSI, Bollinger, volatility, skew,
//!   Sharpe/Sortino/VaR)
//! - Factor and price-action signal computers
//! - Event-driven signal detection over a fixed keyword taxonomy
//! - Cross-asset stat-arb analysis (correlation matrix, spread z-scores)
//! - Composite scoring with normalization, quality, and deterministic
//!   ranking
//! - Risk-constrained capital allocation
//!
//! Nothing here performs I/O or holds mutable global state; all inputs are
//! passed in and all outputs are returned values.

pub mod allocation;
pub mod config;
pub mod domain;
pub mod engine;
pub mod events;
pub mod indicators;
pub mod scoring;
pub mod signals;
pub mod statarb;

pub use config::{ConfigError, EngineConfig, PortfolioRequest};
pub use engine::{compute_asset_signals, overlay_stat_arb, rank_and_size, score_asset};
pub use statarb::{analyze_basket, StatArbReport};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types crossing the batch fan-out boundary are
    /// Send + Sync, so a parallel runner never needs a retrofit.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::Fundamentals>();
        require_sync::<domain::Fundamentals>();
        require_send::<domain::Headline>();
        require_sync::<domain::Headline>();
        require_send::<domain::AssetScore>();
        require_sync::<domain::AssetScore>();
        require_send::<domain::CorrelationPair>();
        require_sync::<domain::CorrelationPair>();
        require_send::<domain::Position>();
        require_sync::<domain::Position>();

        // Configuration
        require_send::<EngineConfig>();
        require_sync::<EngineConfig>();
        require_send::<PortfolioRequest>();
        require_sync::<PortfolioRequest>();

        // Analysis results
        require_send::<StatArbReport>();
        require_sync::<StatArbReport>();
        require_send::<statarb::CorrelationMatrix>();
        require_sync::<statarb::CorrelationMatrix>();
        require_send::<events::EventSignal>();
        require_sync::<events::EventSignal>();

        // The sentiment seam is shared across worker threads.
        require_send::<events::LexiconScorer>();
        require_sync::<events::LexiconScorer>();
    }
}
