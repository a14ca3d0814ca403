//! Fundamentals — named metrics with optional values.
//!
//! Every field is optional: providers routinely return partial data, and a
//! missing metric must degrade the computation it feeds, never crash it.
//! Score computations average over the sub-signals actually present.

use serde::{Deserialize, Serialize};

/// Fundamental metrics for one asset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fundamentals {
    pub pe_ratio: Option<f64>,
    pub return_on_equity: Option<f64>,
    pub return_on_assets: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub revenue_growth: Option<f64>,
    pub earnings_growth: Option<f64>,
    pub week52_high: Option<f64>,
    pub market_cap: Option<f64>,
}

impl Fundamentals {
    /// True when no metric is present at all.
    pub fn is_empty(&self) -> bool {
        self.pe_ratio.is_none()
            && self.return_on_equity.is_none()
            && self.return_on_assets.is_none()
            && self.debt_to_equity.is_none()
            && self.revenue_growth.is_none()
            && self.earnings_growth.is_none()
            && self.week52_high.is_none()
            && self.market_cap.is_none()
    }
}
