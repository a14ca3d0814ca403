//! Risk-constrained capital allocation.
//!
//! Converts ranked scores into whole-share positions under three caps:
//! score-proportional targeting, volatility targeting, and an absolute
//! per-asset ceiling. Total spend never exceeds the requested capital, and
//! the walk is fully deterministic.

use std::collections::BTreeMap;

use crate::config::PortfolioRequest;
use crate::domain::{Position, Symbol};

/// Volatility assumed for assets without an estimate.
pub const DEFAULT_VOLATILITY: f64 = 0.2;

/// Size positions for the given ranked assets.
///
/// `ranked` is `(symbol, score)`; only assets with a known positive price
/// participate. When no asset has a positive score, all priced assets are
/// retained regardless of sign (explicit degradation path) and weighted
/// equally. Returns an empty map rather than an error when nothing fits.
pub fn size_positions(
    ranked: &[(Symbol, f64)],
    prices: &BTreeMap<Symbol, f64>,
    volatilities: &BTreeMap<Symbol, f64>,
    request: &PortfolioRequest,
) -> BTreeMap<Symbol, Position> {
    let priced = |symbol: &Symbol| -> Option<f64> {
        prices
            .get(symbol)
            .copied()
            .filter(|p| p.is_finite() && *p > 0.0)
    };

    let mut candidates: Vec<(Symbol, f64, f64)> = ranked
        .iter()
        .filter(|(_, score)| *score > 0.0)
        .filter_map(|(sym, score)| priced(sym).map(|p| (sym.clone(), *score, p)))
        .collect();

    // Degradation path: no positive conviction anywhere, hold the least-bad
    // priced assets rather than silently returning nothing.
    let equal_weighted = candidates.is_empty();
    if equal_weighted {
        candidates = ranked
            .iter()
            .filter_map(|(sym, score)| priced(sym).map(|p| (sym.clone(), *score, p)))
            .collect();
    }
    if candidates.is_empty() {
        return BTreeMap::new();
    }

    let capital = request.total_capital;
    let candidate_count = candidates.len();
    let total_score: f64 = candidates.iter().map(|(_, s, _)| s.max(0.0)).sum();

    let allocation_for = |score: f64, volatility: f64| -> f64 {
        let weight = if equal_weighted || total_score <= 0.0 {
            1.0 / candidate_count as f64
        } else {
            score.max(0.0) / total_score
        };
        let target = weight * capital * request.diversification_factor;
        let risk_cap =
            request.risk_tolerance * capital / volatility.max(request.volatility_floor);
        target
            .min(risk_cap)
            .min(request.max_allocation_per_asset * capital)
    };

    // Highest conviction claims capital first; symbol breaks ties.
    candidates.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let mut positions = BTreeMap::new();
    let mut remaining = capital;
    for (symbol, score, price) in &candidates {
        if remaining <= 0.0 {
            break;
        }
        let volatility = volatilities
            .get(symbol)
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_VOLATILITY);
        let allocation = allocation_for(*score, volatility).min(remaining);
        let shares = (allocation / price).floor() as u64;
        if shares == 0 {
            continue;
        }
        let position = Position::new(symbol.clone(), shares, *price);
        remaining -= position.cost();
        positions.insert(symbol.clone(), position);
    }

    // Capital too small for the computed allocations: equal-weight the most
    // affordable candidates instead of returning an empty book.
    if positions.is_empty() {
        return affordable_fallback(&candidates, request);
    }
    positions
}

/// Equal-weight pass over candidates sorted by ascending price.
fn affordable_fallback(
    candidates: &[(Symbol, f64, f64)],
    request: &PortfolioRequest,
) -> BTreeMap<Symbol, Position> {
    let mut by_price: Vec<&(Symbol, f64, f64)> = candidates.iter().collect();
    by_price.sort_by(|a, b| {
        a.2.partial_cmp(&b.2)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    let budget = request.total_capital / by_price.len() as f64;
    let mut positions = BTreeMap::new();
    let mut remaining = request.total_capital;
    for (symbol, _, price) in by_price {
        if remaining <= 0.0 {
            break;
        }
        let mut shares = (budget.min(remaining) / price).floor() as u64;
        if shares == 0 && *price <= remaining {
            shares = 1;
        }
        if shares == 0 {
            continue;
        }
        let position = Position::new(symbol.clone(), shares, *price);
        remaining -= position.cost();
        positions.insert(symbol.clone(), position);
    }
    positions
}

/// Total cost of an allocation.
pub fn total_cost(positions: &BTreeMap<Symbol, Position>) -> f64 {
    positions.values().map(|p| p.cost()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(entries: &[(&str, f64)]) -> BTreeMap<Symbol, f64> {
        entries.iter().map(|(s, v)| (s.to_string(), *v)).collect()
    }

    fn request(capital: f64) -> PortfolioRequest {
        PortfolioRequest {
            total_capital: capital,
            ..Default::default()
        }
    }

    #[test]
    fn identical_assets_get_identical_positions() {
        let ranked = vec![("AAA".to_string(), 0.9), ("BBB".to_string(), 0.9)];
        let prices = map(&[("AAA", 50.0), ("BBB", 50.0)]);
        let vols = map(&[("AAA", 0.2), ("BBB", 0.2)]);
        let req = PortfolioRequest {
            total_capital: 10_000.0,
            diversification_factor: 0.5,
            max_allocation_per_asset: 0.5,
            risk_tolerance: 0.05,
            ..Default::default()
        };
        let positions = size_positions(&ranked, &prices, &vols, &req);

        // Each target: 0.5 score weight * 10000 * 0.5 = 2500 → 50 shares.
        assert_eq!(positions["AAA"].shares, 50);
        assert_eq!(positions["BBB"].shares, 50);
        assert!((total_cost(&positions) - 5_000.0).abs() < 1e-9);
        assert!(total_cost(&positions) <= req.total_capital);
    }

    #[test]
    fn spend_never_exceeds_capital() {
        let ranked = vec![
            ("AAA".to_string(), 1.0),
            ("BBB".to_string(), 0.8),
            ("CCC".to_string(), 0.6),
        ];
        let prices = map(&[("AAA", 333.0), ("BBB", 77.0), ("CCC", 12.0)]);
        let vols = map(&[("AAA", 0.5), ("BBB", 0.05), ("CCC", 0.9)]);
        let req = request(1_000.0);
        let positions = size_positions(&ranked, &prices, &vols, &req);
        assert!(total_cost(&positions) <= req.total_capital);
    }

    #[test]
    fn volatility_cap_shrinks_risky_positions() {
        let ranked = vec![("CALM".to_string(), 0.5), ("WILD".to_string(), 0.5)];
        let prices = map(&[("CALM", 10.0), ("WILD", 10.0)]);
        let vols = map(&[("CALM", 0.1), ("WILD", 0.8)]);
        let req = PortfolioRequest {
            total_capital: 100_000.0,
            risk_tolerance: 0.01,
            ..Default::default()
        };
        let positions = size_positions(&ranked, &prices, &vols, &req);
        // risk caps: 1000/0.1 = 10000 vs 1000/0.8 = 1250.
        assert!(positions["CALM"].cost() > positions["WILD"].cost());
    }

    #[test]
    fn per_asset_ceiling_is_respected() {
        let ranked = vec![("AAA".to_string(), 1.0)];
        let prices = map(&[("AAA", 10.0)]);
        let vols = map(&[("AAA", 0.05)]);
        let req = PortfolioRequest {
            total_capital: 100_000.0,
            max_allocation_per_asset: 0.05,
            diversification_factor: 1.0,
            ..Default::default()
        };
        let positions = size_positions(&ranked, &prices, &vols, &req);
        assert!(positions["AAA"].cost() <= 5_000.0 + 1e-9);
    }

    #[test]
    fn unknown_volatility_uses_default() {
        let ranked = vec![("AAA".to_string(), 0.9)];
        let prices = map(&[("AAA", 25.0)]);
        let positions = size_positions(&ranked, &prices, &BTreeMap::new(), &request(50_000.0));
        assert!(positions.contains_key("AAA"));
    }

    #[test]
    fn unpriced_assets_are_skipped() {
        let ranked = vec![("AAA".to_string(), 0.9), ("GHOST".to_string(), 0.95)];
        let prices = map(&[("AAA", 25.0)]);
        let positions = size_positions(&ranked, &prices, &BTreeMap::new(), &request(50_000.0));
        assert!(positions.contains_key("AAA"));
        assert!(!positions.contains_key("GHOST"));
    }

    #[test]
    fn all_nonpositive_scores_fall_back_to_equal_weight() {
        let ranked = vec![("AAA".to_string(), -0.2), ("BBB".to_string(), -0.5)];
        let prices = map(&[("AAA", 20.0), ("BBB", 20.0)]);
        let positions = size_positions(&ranked, &prices, &BTreeMap::new(), &request(10_000.0));
        assert_eq!(positions.len(), 2);
        assert_eq!(positions["AAA"].shares, positions["BBB"].shares);
        assert!(total_cost(&positions) <= 10_000.0);
    }

    #[test]
    fn tiny_capital_uses_affordable_fallback() {
        // Allocations (~2% of 100) are below one share for everything, but
        // the cheapest name is still affordable outright.
        let ranked = vec![("CHEAP".to_string(), 0.4), ("DEAR".to_string(), 0.9)];
        let prices = map(&[("CHEAP", 30.0), ("DEAR", 90.0)]);
        let positions = size_positions(&ranked, &prices, &BTreeMap::new(), &request(100.0));
        assert_eq!(positions.len(), 1);
        assert_eq!(positions["CHEAP"].shares, 1);
        assert!(total_cost(&positions) <= 100.0);
    }

    #[test]
    fn nothing_affordable_returns_empty_not_error() {
        let ranked = vec![("DEAR".to_string(), 0.9)];
        let prices = map(&[("DEAR", 5_000.0)]);
        let positions = size_positions(&ranked, &prices, &BTreeMap::new(), &request(100.0));
        assert!(positions.is_empty());
    }

    #[test]
    fn empty_input_returns_empty() {
        let positions =
            size_positions(&[], &BTreeMap::new(), &BTreeMap::new(), &request(10_000.0));
        assert!(positions.is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let ranked = vec![
            ("AAA".to_string(), 0.7),
            ("BBB".to_string(), 0.7),
            ("CCC".to_string(), 0.3),
        ];
        let prices = map(&[("AAA", 41.0), ("BBB", 41.0), ("CCC", 13.0)]);
        let vols = map(&[("AAA", 0.15), ("BBB", 0.15), ("CCC", 0.45)]);
        let req = request(25_000.0);
        let a = size_positions(&ranked, &prices, &vols, &req);
        let b = size_positions(&ranked, &prices, &vols, &req);
        assert_eq!(a, b);
    }
}
