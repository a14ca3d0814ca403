//! Criterion benchmarks for the scoring hot paths.
//!
//! Benchmarks:
//! 1. Single-asset signal computation over a year of daily bars
//! 2. Cross-asset analysis over a mid-sized basket
//! 3. Ranking and sizing over a scored universe

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::BTreeMap;

use alphalab_core::config::{EngineConfig, PortfolioRequest};
use alphalab_core::domain::{AssetScore, Bar, Fundamentals, Headline, PriceSeries, Symbol};
use alphalab_core::events::LexiconScorer;
use alphalab_core::{analyze_basket, rank_and_size, score_asset};

fn make_series(symbol: &str, n: usize, phase: f64) -> PriceSeries {
    let base_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
    let bars: Vec<Bar> = (0..n)
        .map(|i| {
            let close = 100.0 + ((i as f64 + phase) * 0.1).sin() * 10.0 + i as f64 * 0.05;
            Bar {
                symbol: symbol.to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000,
                adj_close: close,
            }
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}

fn fundamentals() -> Fundamentals {
    Fundamentals {
        pe_ratio: Some(21.0),
        return_on_equity: Some(0.16),
        return_on_assets: Some(0.06),
        debt_to_equity: Some(0.6),
        revenue_growth: Some(0.12),
        earnings_growth: Some(0.18),
        week52_high: Some(130.0),
        market_cap: Some(2e10),
    }
}

fn bench_score_asset(c: &mut Criterion) {
    let config = EngineConfig::default();
    let series = make_series("SPY", 252, 0.0);
    let funds = fundamentals();
    let headlines = vec![
        Headline::new("Earnings beat: record profit growth in strong quarter"),
        Headline::new("Analysts upgrade on strong expansion"),
        Headline::new("New product launch announced"),
    ];

    c.bench_function("score_asset_252_bars", |b| {
        b.iter(|| {
            black_box(score_asset(
                black_box(&series),
                black_box(&funds),
                black_box(&headlines),
                &LexiconScorer,
                &config,
            ))
        })
    });
}

fn bench_analyze_basket(c: &mut Criterion) {
    let config = EngineConfig::default();
    let basket: BTreeMap<Symbol, PriceSeries> = (0..12)
        .map(|i| {
            (
                format!("SYM{i:02}"),
                make_series(&format!("SYM{i:02}"), 252, i as f64 * 0.3),
            )
        })
        .collect();

    c.bench_function("analyze_basket_12_symbols", |b| {
        b.iter(|| black_box(analyze_basket(black_box(&basket), &config.stat_arb)))
    });
}

fn bench_rank_and_size(c: &mut Criterion) {
    let config = EngineConfig::default();
    let request = PortfolioRequest {
        total_capital: 1_000_000.0,
        ..Default::default()
    };
    let mut scores = BTreeMap::new();
    let mut prices = BTreeMap::new();
    let mut vols = BTreeMap::new();
    for i in 0..100 {
        let sym = format!("SYM{i:03}");
        scores.insert(
            sym.clone(),
            AssetScore {
                composite_score: 0.9 - i as f64 * 0.008,
                signal_quality: 0.4 + (i % 5) as f64 * 0.1,
                ..Default::default()
            },
        );
        prices.insert(sym.clone(), 20.0 + i as f64 * 3.0);
        vols.insert(sym, 0.1 + (i % 7) as f64 * 0.05);
    }

    c.bench_function("rank_and_size_100_assets", |b| {
        b.iter(|| {
            black_box(
                rank_and_size(
                    black_box(&scores),
                    black_box(&prices),
                    black_box(&vols),
                    &request,
                    &config,
                )
                .unwrap(),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_score_asset,
    bench_analyze_basket,
    bench_rank_and_size
);
criterion_main!(benches);
