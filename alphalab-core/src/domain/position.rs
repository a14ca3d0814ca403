//! Position — a whole-share allocation produced by the sizer.

use serde::{Deserialize, Serialize};

/// One sized position. Created fresh each allocation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub shares: u64,
    pub price: f64,
}

impl Position {
    pub fn new(symbol: impl Into<String>, shares: u64, price: f64) -> Self {
        Self {
            symbol: symbol.into(),
            shares,
            price,
        }
    }

    /// Capital consumed by this position.
    pub fn cost(&self) -> f64 {
        self.shares as f64 * self.price
    }
}
