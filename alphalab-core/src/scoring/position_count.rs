//! Automatic position-count selection.
//!
//! Given the qualifying assets in rank order, greedily admit the whole top
//! tier, then middle-tier assets only while a configured fraction of
//! capital is projected to remain unallocated, then lower-tier assets only
//! against a larger surplus. A slot counts only when its projected
//! allocation could buy a meaningful stake (more than half one share).

use std::collections::BTreeMap;

use crate::config::PortfolioRequest;
use crate::domain::Symbol;

/// Decide how many of the ranked qualifying assets to hold.
///
/// `qualifying` is `(symbol, composite_score)` in rank order, already
/// filtered for positive score and acceptable quality.
pub fn determine_position_count(
    qualifying: &[(Symbol, f64)],
    prices: &BTreeMap<Symbol, f64>,
    request: &PortfolioRequest,
) -> usize {
    if qualifying.is_empty() {
        return 0;
    }

    let capital = request.total_capital;
    let total_score: f64 = qualifying.iter().map(|(_, s)| s.max(0.0)).sum();

    // Projected per-asset allocation mirrors the allocator's target formula.
    let projected = |score: f64| -> f64 {
        let weight = if total_score > 0.0 {
            score.max(0.0) / total_score
        } else {
            1.0 / qualifying.len() as f64
        };
        (weight * capital * request.diversification_factor)
            .min(request.max_allocation_per_asset * capital)
    };

    let viable = |symbol: &Symbol, allocation: f64| -> bool {
        match prices.get(symbol) {
            Some(&price) if price.is_finite() && price > 0.0 => allocation > price * 0.5,
            _ => false,
        }
    };

    let limits = &request.limits;
    let mut count = 0usize;
    let mut projected_spent = 0.0;

    for (symbol, score) in qualifying {
        if count >= limits.max_positions {
            break;
        }
        let allocation = projected(*score);
        if !viable(symbol, allocation) {
            continue;
        }
        let remaining_fraction = (capital - projected_spent) / capital;

        let admit = if *score > limits.top_tier_score {
            true
        } else if *score > limits.middle_tier_score {
            remaining_fraction >= limits.middle_capital_fraction
        } else {
            remaining_fraction >= limits.lower_capital_fraction
        };
        if admit {
            count += 1;
            projected_spent += allocation;
        }
    }

    // Hard floor when candidates and capital allow: take the next viable
    // names in rank order until the minimum is met.
    let viable_candidates = qualifying
        .iter()
        .filter(|(sym, score)| viable(sym, projected(*score)))
        .count();
    let floor = limits.min_positions.min(viable_candidates);
    count.max(floor).min(limits.max_positions)
}
