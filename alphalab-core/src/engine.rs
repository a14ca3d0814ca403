//! Engine boundary — the three public operations of the core.
//!
//! - `compute_asset_signals`: single-asset analysis (factors, price action,
//!   sentiment, events) into one `AssetScore`.
//! - `overlay_stat_arb`: merge a cross-asset report into existing scores.
//! - `rank_and_size`: quality-filter, rank, pick a position count, and
//!   allocate capital.
//!
//! Configuration is validated here, before any computation; per-asset data
//! insufficiency never surfaces as an error past this point.

use std::collections::BTreeMap;

use crate::allocation::size_positions;
use crate::config::{ConfigError, EngineConfig, PortfolioRequest};
use crate::domain::{
    AssetScore, Fundamentals, Headline, Position, PriceSeries, SignalBreakdown, Symbol,
};
use crate::events::{compute_sentiment_signals, EventDetector, SentimentScorer};
use crate::scoring::{
    composite_score, determine_position_count, normalize, rank_assets, signal_quality,
};
use crate::signals::{compute_factor_signals, compute_price_action, detect_volatility_regime};
use crate::statarb::StatArbReport;

/// Analyze one asset into a composite score with quality estimate.
///
/// Sentiment and event channels are absent (not zero) when no headlines
/// were supplied; the stat-arb channel is filled in later by
/// [`overlay_stat_arb`].
pub fn compute_asset_signals(
    series: &PriceSeries,
    fundamentals: &Fundamentals,
    headlines: &[Headline],
    scorer: &dyn SentimentScorer,
    config: &EngineConfig,
) -> Result<AssetScore, ConfigError> {
    config.validate()?;
    Ok(score_asset(series, fundamentals, headlines, scorer, config))
}

/// Unvalidated scoring path shared by the public entry point and batch
/// callers that validated the config once up front.
pub fn score_asset(
    series: &PriceSeries,
    fundamentals: &Fundamentals,
    headlines: &[Headline],
    scorer: &dyn SentimentScorer,
    config: &EngineConfig,
) -> AssetScore {
    let factor = compute_factor_signals(series, fundamentals, config);
    let price_action = compute_price_action(series, config);
    let regime = detect_volatility_regime(series, config);

    let (sentiment, event_signal) = if headlines.is_empty() {
        (None, None)
    } else {
        let detector = EventDetector::new(config.event_window);
        let event = detector.composite(headlines, series, scorer);
        (
            Some(compute_sentiment_signals(headlines, scorer)),
            Some(event.regime_filtered(regime.regime)),
        )
    };

    let normalized = normalize(
        &factor,
        &price_action,
        sentiment.as_ref(),
        event_signal,
        None,
        &config.normalize,
    );

    AssetScore {
        composite_score: composite_score(&normalized, &config.weights),
        signal_quality: signal_quality(&normalized),
        breakdown: SignalBreakdown {
            factor,
            price_action,
            sentiment,
            event_signal,
            stat_arb_z: None,
            normalized,
        },
    }
}

/// Merge a cross-asset report into per-asset scores.
///
/// Assets that appear in at least one pair get their stat-arb channel set
/// to the mean spread z-score across their pairs, and their composite and
/// quality are recomputed. Assets without pairs are untouched.
pub fn overlay_stat_arb(
    scores: &mut BTreeMap<Symbol, AssetScore>,
    report: &StatArbReport,
    config: &EngineConfig,
) {
    for (symbol, z) in report.mean_z_by_symbol() {
        let Some(score) = scores.get_mut(&symbol) else {
            continue;
        };
        score.breakdown.stat_arb_z = Some(z);
        let normalized = normalize(
            &score.breakdown.factor,
            &score.breakdown.price_action,
            score.breakdown.sentiment.as_ref(),
            score.breakdown.event_signal,
            Some(z),
            &config.normalize,
        );
        score.breakdown.normalized = normalized;
        score.composite_score = composite_score(&normalized, &config.weights);
        score.signal_quality = signal_quality(&normalized);
    }
}

/// Rank scored assets, choose a position count, and allocate capital.
///
/// Qualifying assets need a positive composite and quality at or above the
/// configured floor. When nothing qualifies, the ranked universe is handed
/// to the sizer anyway and its own degradation path applies. Never errors
/// for "no positions" — an empty map is a valid outcome.
pub fn rank_and_size(
    scores: &BTreeMap<Symbol, AssetScore>,
    prices: &BTreeMap<Symbol, f64>,
    volatilities: &BTreeMap<Symbol, f64>,
    request: &PortfolioRequest,
    config: &EngineConfig,
) -> Result<BTreeMap<Symbol, Position>, ConfigError> {
    config.validate()?;
    request.validate()?;

    let ranked = rank_assets(scores, config.tie_jitter_seed);
    let qualifying: Vec<(Symbol, f64)> = ranked
        .iter()
        .filter(|r| r.composite_score > 0.0 && r.signal_quality >= request.min_signal_quality)
        .map(|r| (r.symbol.clone(), r.composite_score))
        .collect();

    let selected: Vec<(Symbol, f64)> = if qualifying.is_empty() {
        ranked
            .iter()
            .take(request.limits.max_positions)
            .map(|r| (r.symbol.clone(), r.composite_score))
            .collect()
    } else {
        let count = determine_position_count(&qualifying, prices, request);
        qualifying.into_iter().take(count).collect()
    };

    Ok(size_positions(&selected, prices, volatilities, request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::total_cost;
    use crate::events::LexiconScorer;
    use crate::signals::make_series;

    fn rich_series() -> PriceSeries {
        // A steady riser with mild chop: trend up, moderate volatility.
        let mut closes = vec![100.0];
        for i in 1..120 {
            let prev: f64 = closes[i - 1];
            let drift = 0.002;
            let chop = if i % 2 == 0 { 0.004 } else { -0.003 };
            closes.push(prev * (1.0 + drift + chop));
        }
        make_series(&closes)
    }

    fn rich_fundamentals() -> Fundamentals {
        Fundamentals {
            pe_ratio: Some(22.0),
            return_on_equity: Some(0.18),
            return_on_assets: Some(0.07),
            debt_to_equity: Some(0.4),
            revenue_growth: Some(0.18),
            earnings_growth: Some(0.22),
            week52_high: Some(130.0),
            market_cap: Some(5e10),
        }
    }

    #[test]
    fn rich_asset_scores_positive_with_quality() {
        let headlines = vec![
            Headline::new("Acme earnings beat: record profit growth, strong quarter"),
            Headline::new("Analysts upgrade Acme on strong expansion"),
        ];
        let score = compute_asset_signals(
            &rich_series(),
            &rich_fundamentals(),
            &headlines,
            &LexiconScorer,
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(score.composite_score > 0.0);
        assert!((0.0..=1.0).contains(&score.signal_quality));
        assert!(score.breakdown.sentiment.is_some());
        assert!(score.breakdown.event_signal.is_some());
        assert!(score.breakdown.stat_arb_z.is_none());
    }

    #[test]
    fn bare_asset_still_scores() {
        // Three bars, no fundamentals, no headlines: every channel falls
        // back to its neutral default and the pass completes.
        let series = make_series(&[100.0, 101.0, 99.5]);
        let score = compute_asset_signals(
            &series,
            &Fundamentals::default(),
            &[],
            &LexiconScorer,
            &EngineConfig::default(),
        )
        .unwrap();

        assert!(score.composite_score.is_finite());
        assert_eq!(score.breakdown.factor.value_score, 0.0);
        assert!(score.breakdown.sentiment.is_none());
        assert!(score.breakdown.event_signal.is_none());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = EngineConfig::default();
        config.weights.momentum = 0.9;
        let result = compute_asset_signals(
            &rich_series(),
            &Fundamentals::default(),
            &[],
            &LexiconScorer,
            &config,
        );
        assert!(result.is_err());
    }

    #[test]
    fn overlay_updates_only_paired_assets() {
        let config = EngineConfig::default();
        let mut scores = BTreeMap::new();
        for sym in ["AAA", "BBB", "CCC"] {
            let score = score_asset(
                &rich_series(),
                &rich_fundamentals(),
                &[],
                &LexiconScorer,
                &config,
            );
            scores.insert(sym.to_string(), score);
        }
        let before_ccc = scores["CCC"].clone();

        let report = StatArbReport {
            matrix: None,
            pairs: vec![crate::domain::CorrelationPair {
                symbol_a: "AAA".into(),
                symbol_b: "BBB".into(),
                correlation: 0.9,
                spread_z: 2.4,
                classification: crate::domain::PairClass::LongShort,
            }],
        };
        overlay_stat_arb(&mut scores, &report, &config);

        assert_eq!(scores["AAA"].breakdown.stat_arb_z, Some(2.4));
        assert_eq!(scores["BBB"].breakdown.stat_arb_z, Some(-2.4));
        // Stretched-high spread drags the first leg down and lifts the second.
        assert!(scores["AAA"].composite_score < scores["BBB"].composite_score);
        assert_eq!(scores["CCC"], before_ccc);
    }

    #[test]
    fn rank_and_size_end_to_end() {
        let config = EngineConfig::default();
        let mut scores = BTreeMap::new();
        let mut prices = BTreeMap::new();
        let mut vols = BTreeMap::new();
        for (i, sym) in ["AAA", "BBB", "CCC", "DDD"].iter().enumerate() {
            scores.insert(
                sym.to_string(),
                AssetScore {
                    composite_score: 0.8 - i as f64 * 0.15,
                    signal_quality: 0.7,
                    ..Default::default()
                },
            );
            prices.insert(sym.to_string(), 20.0 + i as f64 * 10.0);
            vols.insert(sym.to_string(), 0.2);
        }
        let request = PortfolioRequest {
            total_capital: 50_000.0,
            ..Default::default()
        };
        let positions = rank_and_size(&scores, &prices, &vols, &request, &config).unwrap();

        assert!(!positions.is_empty());
        assert!(total_cost(&positions) <= request.total_capital);
        for p in positions.values() {
            assert!(p.shares > 0);
        }
    }

    #[test]
    fn rank_and_size_rejects_bad_request() {
        let request = PortfolioRequest {
            total_capital: -5.0,
            ..Default::default()
        };
        let result = rank_and_size(
            &BTreeMap::new(),
            &BTreeMap::new(),
            &BTreeMap::new(),
            &request,
            &EngineConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn low_quality_assets_are_disqualified() {
        let config = EngineConfig::default();
        let mut scores = BTreeMap::new();
        scores.insert(
            "GOOD".to_string(),
            AssetScore {
                composite_score: 0.5,
                signal_quality: 0.8,
                ..Default::default()
            },
        );
        scores.insert(
            "SHAKY".to_string(),
            AssetScore {
                composite_score: 0.9,
                signal_quality: 0.1,
                ..Default::default()
            },
        );
        let prices: BTreeMap<Symbol, f64> =
            [("GOOD", 25.0), ("SHAKY", 25.0)]
                .iter()
                .map(|(s, p)| (s.to_string(), *p))
                .collect();
        let request = PortfolioRequest {
            total_capital: 20_000.0,
            ..Default::default()
        };
        let positions =
            rank_and_size(&scores, &prices, &BTreeMap::new(), &request, &config).unwrap();
        assert!(positions.contains_key("GOOD"));
        assert!(!positions.contains_key("SHAKY"));
    }
}
