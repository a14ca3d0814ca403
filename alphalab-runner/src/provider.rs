//! Collaborator seams: market data, news, and universe providers.
//!
//! The engine is agnostic to where data comes from; anything that can
//! produce series, fundamentals, and headlines plugs in here. Provider
//! failures are per-asset events — the batch analyzer skips and counts
//! them, it never aborts.

use thiserror::Error;

use alphalab_core::domain::{Fundamentals, Headline, PriceSeries, Symbol};

/// Errors a data collaborator can report.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no data available for '{0}'")]
    NoData(String),
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Price and fundamentals source.
pub trait MarketDataProvider: Send + Sync {
    /// Price series covering roughly the trailing `lookback_days`.
    ///
    /// Must fail with [`ProviderError::NoData`] rather than return an empty
    /// series.
    fn price_series(&self, symbol: &str, lookback_days: usize)
        -> Result<PriceSeries, ProviderError>;

    fn fundamentals(&self, symbol: &str) -> Result<Fundamentals, ProviderError>;
}

/// Headline source.
pub trait NewsProvider: Send + Sync {
    fn headlines(&self, symbol: &str, limit: usize) -> Result<Vec<Headline>, ProviderError>;
}

/// Candidate-universe source.
///
/// Universe curation is data, not engine logic; it lives behind this seam.
pub trait UniverseProvider: Send + Sync {
    fn candidates(&self) -> Vec<Symbol>;
}

/// Fixed universe from a plain symbol list, deduplicated in order.
#[derive(Debug, Clone)]
pub struct StaticUniverse {
    symbols: Vec<Symbol>,
}

impl StaticUniverse {
    pub fn new(symbols: impl IntoIterator<Item = impl Into<Symbol>>) -> Self {
        let mut seen = std::collections::BTreeSet::new();
        let symbols = symbols
            .into_iter()
            .map(Into::into)
            .filter(|s| seen.insert(s.clone()))
            .collect();
        Self { symbols }
    }
}

impl UniverseProvider for StaticUniverse {
    fn candidates(&self) -> Vec<Symbol> {
        self.symbols.clone()
    }
}
