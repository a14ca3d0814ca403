//! Event-driven signal detection from news headlines.
//!
//! A fixed keyword taxonomy classifies headlines into event categories
//! (earnings, merger, product, management), each category scores the
//! sentiment of its matches, and the earnings category couples sentiment
//! with the short-horizon price reaction. The detector holds no mutable
//! state across calls.

pub mod detector;
pub mod sentiment;
pub mod taxonomy;

pub use detector::{CategoryDetection, EventDetector, EventImpact, EventSignal, NewsFlow};
pub use sentiment::{compute_sentiment_signals, tone_adjusted, LexiconScorer, SentimentScorer};
pub use taxonomy::{EventCategory, NEGATIVE_TONE, POSITIVE_TONE};
