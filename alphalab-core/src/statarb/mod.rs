//! Cross-asset statistical arbitrage: correlation matrix, spread z-scores,
//! pair classification.
//!
//! The basket is aligned on the dates every symbol shares; fewer than two
//! assets or twenty overlapping return observations yields an empty report,
//! never an error. Pair enumeration is bounded to a fixed basket prefix as
//! a scalability trade-off.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::StatArbParams;
use crate::domain::{CorrelationPair, PairClass, PriceSeries, Symbol};
use crate::indicators::{mean, sample_std};

/// Minimum overlapping return observations for the analysis to run.
const MIN_RETURN_OBSERVATIONS: usize = 20;

/// Symmetric return-correlation matrix over the basket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    symbols: Vec<Symbol>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Correlation between two symbols, if both are in the basket.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.symbols.iter().position(|s| s == a)?;
        let j = self.symbols.iter().position(|s| s == b)?;
        Some(self.values[i][j])
    }

    fn at(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Result of one cross-asset analysis pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatArbReport {
    pub matrix: Option<CorrelationMatrix>,
    pub pairs: Vec<CorrelationPair>,
}

impl StatArbReport {
    /// Mean spread z-score per symbol across its pairs.
    ///
    /// The second leg sees the spread from the other side, so its z-score
    /// enters with flipped sign. Feeds the stat-arb channel of the
    /// composite score.
    pub fn mean_z_by_symbol(&self) -> BTreeMap<Symbol, f64> {
        let mut zs: BTreeMap<Symbol, Vec<f64>> = BTreeMap::new();
        for pair in &self.pairs {
            zs.entry(pair.symbol_a.clone()).or_default().push(pair.spread_z);
            zs.entry(pair.symbol_b.clone()).or_default().push(-pair.spread_z);
        }
        zs.into_iter().map(|(sym, v)| (sym, mean(&v))).collect()
    }
}

/// Analyze a basket of aligned price series.
pub fn analyze_basket(
    basket: &BTreeMap<Symbol, PriceSeries>,
    params: &StatArbParams,
) -> StatArbReport {
    if basket.len() < 2 {
        return StatArbReport::default();
    }

    // Dates every symbol has a finite close for.
    let mut common: Option<BTreeSet<NaiveDate>> = None;
    for series in basket.values() {
        let dates: BTreeSet<NaiveDate> = series
            .bars()
            .iter()
            .filter(|b| b.close.is_finite())
            .map(|b| b.date)
            .collect();
        common = Some(match common {
            None => dates,
            Some(prev) => prev.intersection(&dates).copied().collect(),
        });
    }
    let common = common.unwrap_or_default();
    if common.len() < MIN_RETURN_OBSERVATIONS + 1 {
        return StatArbReport::default();
    }

    let symbols: Vec<Symbol> = basket.keys().cloned().collect();
    let aligned: Vec<Vec<f64>> = symbols
        .iter()
        .map(|sym| {
            basket[sym]
                .bars()
                .iter()
                .filter(|b| common.contains(&b.date))
                .map(|b| b.close)
                .collect()
        })
        .collect();

    let returns: Vec<Vec<f64>> = aligned.iter().map(|closes| simple_returns(closes)).collect();
    if returns.iter().any(|r| r.len() < MIN_RETURN_OBSERVATIONS) {
        return StatArbReport::default();
    }

    let n = symbols.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let corr = pearson(&returns[i], &returns[j]);
            values[i][j] = corr;
            values[j][i] = corr;
        }
    }
    let matrix = CorrelationMatrix { symbols, values };

    let pairs = enumerate_pairs(&matrix, &aligned, params);
    StatArbReport {
        matrix: Some(matrix),
        pairs,
    }
}

fn enumerate_pairs(
    matrix: &CorrelationMatrix,
    aligned: &[Vec<f64>],
    params: &StatArbParams,
) -> Vec<CorrelationPair> {
    let n = matrix.symbols.len();
    let mut pairs = Vec::new();
    for i in 0..n.min(params.max_basket_prefix) {
        for j in (i + 1)..n.min(i + 1 + params.pair_span) {
            let correlation = matrix.at(i, j);
            if !(correlation > params.correlation_threshold) {
                continue;
            }
            let Some((spread_z, _)) = spread_zscore(&aligned[i], &aligned[j]) else {
                continue;
            };
            pairs.push(CorrelationPair {
                symbol_a: matrix.symbols[i].clone(),
                symbol_b: matrix.symbols[j].clone(),
                correlation,
                spread_z,
                classification: PairClass::classify(
                    spread_z,
                    params.directional_entry,
                    params.pair_entry,
                ),
            });
        }
    }
    pairs
}

/// Z-score of the current log-price spread against its full-window
/// distribution. None when the spread is degenerate (zero dispersion or
/// non-positive prices).
fn spread_zscore(a: &[f64], b: &[f64]) -> Option<(f64, f64)> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    let mut spread = Vec::with_capacity(a.len());
    for (&pa, &pb) in a.iter().zip(b) {
        if pa <= 0.0 || pb <= 0.0 || !pa.is_finite() || !pb.is_finite() {
            return None;
        }
        spread.push(pa.ln() - pb.ln());
    }
    let m = mean(&spread);
    let std = sample_std(&spread);
    if !std.is_finite() || std <= 0.0 {
        return None;
    }
    let z = (spread.last()? - m) / std;
    Some((z, std))
}

fn simple_returns(closes: &[f64]) -> Vec<f64> {
    closes
        .windows(2)
        .map(|w| {
            if w[0] != 0.0 && w[0].is_finite() && w[1].is_finite() {
                w[1] / w[0] - 1.0
            } else {
                f64::NAN
            }
        })
        .collect()
}

/// Pearson correlation of two equal-length samples; NaN when either side
/// has zero variance.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    let ma = mean(a);
    let mb = mean(b);
    let mut cov = 0.0;
    let mut va = 0.0;
    let mut vb = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        va += (x - ma) * (x - ma);
        vb += (y - mb) * (y - mb);
    }
    if va <= 0.0 || vb <= 0.0 {
        return f64::NAN;
    }
    cov / (va.sqrt() * vb.sqrt())
}
