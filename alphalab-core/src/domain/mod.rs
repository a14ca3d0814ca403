//! Domain types for the signal and allocation engine.

pub mod bar;
pub mod fundamentals;
pub mod headline;
pub mod pair;
pub mod position;
pub mod regime;
pub mod signals;

pub use bar::{Bar, PriceSeries, SeriesError};
pub use fundamentals::Fundamentals;
pub use headline::Headline;
pub use pair::{CorrelationPair, PairClass};
pub use position::Position;
pub use regime::VolatilityRegime;
pub use signals::{
    AssetScore, FactorSignals, NormalizedSignals, PriceActionSignals, SentimentSignals,
    SignalBreakdown,
};

/// Symbol type alias
pub type Symbol = String;
