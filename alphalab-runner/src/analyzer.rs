//! Batch universe analysis — gather, fan out, synchronize, allocate.
//!
//! Provider I/O runs up front (collaborators own any blocking); per-asset
//! signal computation then fans out across the rayon pool, since each
//! asset is independent. The cross-asset analysis and the allocator are
//! synchronization points that run only after the fan-out completes.
//! Ordering never matters: results are keyed per symbol and sorted
//! deterministically afterward.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use alphalab_core::config::ConfigError;
use alphalab_core::domain::{
    AssetScore, Fundamentals, Headline, Position, PriceSeries, Symbol,
};
use alphalab_core::events::SentimentScorer;
use alphalab_core::{
    analyze_basket, overlay_stat_arb, rank_and_size, score_asset, EngineConfig, PortfolioRequest,
    StatArbReport,
};

use crate::provider::{MarketDataProvider, NewsProvider, ProviderError};

/// Errors from the batch analyzer.
///
/// Only boundary validation can fail; per-asset problems are folded into
/// the report's skip list instead.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Data-gathering knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerOptions {
    /// Trailing price history requested per asset.
    pub lookback_days: usize,
    /// Headlines requested per asset.
    pub headline_limit: usize,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            headline_limit: 10,
        }
    }
}

/// Outcome of one full universe pass.
#[derive(Debug, Clone, Default)]
pub struct AnalysisReport {
    pub scores: BTreeMap<Symbol, AssetScore>,
    pub stat_arb: StatArbReport,
    pub positions: BTreeMap<Symbol, Position>,
    pub prices: BTreeMap<Symbol, f64>,
    /// Assets dropped because their data could not be gathered. Reported
    /// as a list, never propagated as an error.
    pub skipped: Vec<Symbol>,
    pub invested: f64,
    pub cash_remaining: f64,
}

impl AnalysisReport {
    pub fn analyzed_count(&self) -> usize {
        self.scores.len()
    }
}

/// Per-asset inputs after the gather stage.
struct AssetInputs {
    symbol: Symbol,
    series: PriceSeries,
    fundamentals: Fundamentals,
    headlines: Vec<Headline>,
}

/// Analyze a universe end-to-end: signals, cross-asset overlay, ranking,
/// and allocation.
pub fn analyze_universe(
    market: &dyn MarketDataProvider,
    news: &dyn NewsProvider,
    scorer: &dyn SentimentScorer,
    universe: &[Symbol],
    config: &EngineConfig,
    request: &PortfolioRequest,
    options: &AnalyzerOptions,
) -> Result<AnalysisReport, RunError> {
    config.validate()?;
    request.validate()?;

    // Gather stage: collaborator I/O, per-asset failures tolerated.
    let mut inputs = Vec::with_capacity(universe.len());
    let mut skipped = Vec::new();
    for symbol in universe {
        match gather_asset(market, news, symbol, options) {
            Ok(asset) => inputs.push(asset),
            Err(error) => {
                tracing::warn!(symbol = %symbol, %error, "skipping asset");
                skipped.push(symbol.clone());
            }
        }
    }

    // Fan-out: pure computation, one result slot per symbol.
    let mut scores: BTreeMap<Symbol, AssetScore> = inputs
        .par_iter()
        .map(|asset| {
            let score = score_asset(
                &asset.series,
                &asset.fundamentals,
                &asset.headlines,
                scorer,
                config,
            );
            (asset.symbol.clone(), score)
        })
        .collect();

    // Synchronization point: cross-asset analysis needs the whole basket.
    let basket: BTreeMap<Symbol, PriceSeries> = inputs
        .iter()
        .map(|asset| (asset.symbol.clone(), asset.series.clone()))
        .collect();
    let stat_arb = analyze_basket(&basket, &config.stat_arb);
    overlay_stat_arb(&mut scores, &stat_arb, config);

    let prices: BTreeMap<Symbol, f64> = inputs
        .iter()
        .filter_map(|asset| asset.series.last_close().map(|p| (asset.symbol.clone(), p)))
        .collect();
    let volatilities: BTreeMap<Symbol, f64> = scores
        .iter()
        .map(|(sym, score)| {
            (
                sym.clone(),
                score.breakdown.price_action.realized_volatility,
            )
        })
        .collect();

    let positions = rank_and_size(&scores, &prices, &volatilities, request, config)?;

    let invested: f64 = positions.values().map(|p| p.cost()).sum();
    tracing::info!(
        analyzed = scores.len(),
        skipped = skipped.len(),
        pairs = stat_arb.pairs.len(),
        positions = positions.len(),
        invested,
        "universe analysis complete"
    );

    Ok(AnalysisReport {
        scores,
        stat_arb,
        positions,
        prices,
        skipped,
        invested,
        cash_remaining: request.total_capital - invested,
    })
}

fn gather_asset(
    market: &dyn MarketDataProvider,
    news: &dyn NewsProvider,
    symbol: &Symbol,
    options: &AnalyzerOptions,
) -> Result<AssetInputs, ProviderError> {
    let series = market.price_series(symbol, options.lookback_days)?;
    if series.is_empty() {
        return Err(ProviderError::NoData(symbol.clone()));
    }

    // Fundamentals and news are optional enrichments; their absence only
    // degrades the affected channels.
    let fundamentals = match market.fundamentals(symbol) {
        Ok(f) => f,
        Err(error) => {
            tracing::debug!(symbol = %symbol, %error, "no fundamentals");
            Fundamentals::default()
        }
    };
    let headlines = match news.headlines(symbol, options.headline_limit) {
        Ok(h) => h,
        Err(error) => {
            tracing::debug!(symbol = %symbol, %error, "no headlines");
            Vec::new()
        }
    };

    Ok(AssetInputs {
        symbol: symbol.clone(),
        series,
        fundamentals,
        headlines,
    })
}
