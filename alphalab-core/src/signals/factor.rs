//! Factor scores: value, quality, volatility regime, momentum.
//!
//! Value and quality award tiered credits per sub-signal and average over
//! the sub-signals actually available — an asset is not punished for
//! fundamentals it never disclosed. Native range of each score is 0–2
//! (momentum 0–1).

use crate::config::EngineConfig;
use crate::domain::{FactorSignals, Fundamentals, PriceSeries};
use crate::indicators::{sharpe, DAILY_RISK_FREE};
use crate::signals::momentum::{momentum_score, momentum_snapshot};
use crate::signals::regime::detect_volatility_regime;

/// Value factor: growth, earnings multiple, and 52-week-high proximity.
///
/// Averages over available sub-signals; all-missing fundamentals score 0.
pub fn value_score(fundamentals: &Fundamentals, last_close: Option<f64>) -> f64 {
    let mut score = 0.0;
    let mut count = 0u32;

    if let Some(growth) = fundamentals.revenue_growth {
        if growth > 0.15 {
            score += 2.0;
        } else if growth > 0.10 {
            score += 1.0;
        }
        count += 1;
    }

    if let Some(growth) = fundamentals.earnings_growth {
        if growth > 0.20 {
            score += 2.0;
        } else if growth > 0.15 {
            score += 1.0;
        }
        count += 1;
    }

    if let Some(pe) = fundamentals.pe_ratio.filter(|pe| *pe > 0.0) {
        if (10.0..=30.0).contains(&pe) {
            score += 1.5;
        } else if (5.0..=40.0).contains(&pe) {
            score += 0.5;
        }
        count += 1;
    }

    if let (Some(high), Some(price)) = (
        fundamentals.week52_high.filter(|h| *h > 0.0),
        last_close.filter(|p| p.is_finite()),
    ) {
        let proximity = price / high;
        if proximity > 0.8 {
            score += 1.0;
        } else if proximity > 0.6 {
            score += 0.5;
        }
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        score / count as f64
    }
}

/// Quality factor: risk-adjusted returns, profitability, and leverage.
///
/// The Sharpe sub-signal is always available (it defaults to 0 on short
/// history); the fundamental sub-signals count only when present.
pub fn quality_score(series: &PriceSeries, fundamentals: &Fundamentals) -> f64 {
    let mut score = 0.0;
    let mut count = 1u32;

    let sharpe = sharpe(&series.closes(), DAILY_RISK_FREE);
    if sharpe > 1.0 {
        score += 2.0;
    } else if sharpe > 0.5 {
        score += 1.0;
    }

    if let Some(roe) = fundamentals.return_on_equity {
        if roe > 0.15 {
            score += 2.0;
        } else if roe > 0.10 {
            score += 1.0;
        }
        count += 1;
    }

    if let Some(roa) = fundamentals.return_on_assets {
        if roa > 0.05 {
            score += 1.0;
        }
        count += 1;
    }

    if let Some(de) = fundamentals.debt_to_equity {
        if de < 0.5 {
            score += 2.0;
        } else if de < 1.0 {
            score += 1.0;
        }
        count += 1;
    }

    score / count as f64
}

/// All four factor scores for one asset.
pub fn compute_factor_signals(
    series: &PriceSeries,
    fundamentals: &Fundamentals,
    config: &EngineConfig,
) -> FactorSignals {
    let regime = detect_volatility_regime(series, config);
    let snapshot = momentum_snapshot(series, config);
    FactorSignals {
        value_score: value_score(fundamentals, series.last_close()),
        quality_score: quality_score(series, fundamentals),
        volatility_score: regime.regime.ordinal_score(),
        momentum_score: momentum_score(&snapshot),
    }
}
