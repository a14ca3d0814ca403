//! Fixed keyword taxonomy for event classification.
//!
//! Matching is case-insensitive substring search, so keyword lists favor
//! word stems ("beat" also matches "beats").

use serde::{Deserialize, Serialize};

/// Positive-tone lexicon.
pub const POSITIVE_TONE: &[&str] = &[
    "beat",
    "exceed",
    "growth",
    "profit",
    "surge",
    "gain",
    "rise",
    "upgrade",
    "bullish",
    "acquisition",
    "partnership",
    "innovation",
    "breakthrough",
    "strong",
    "outperform",
    "record",
    "expansion",
];

/// Negative-tone lexicon.
pub const NEGATIVE_TONE: &[&str] = &[
    "miss",
    "decline",
    "loss",
    "fall",
    "drop",
    "downgrade",
    "bearish",
    "lawsuit",
    "scandal",
    "weak",
    "underperform",
    "layoff",
    "closure",
    "warning",
    "concern",
    "investigation",
    "fine",
    "penalty",
];

const EARNINGS_KEYWORDS: &[&str] = &[
    "earnings", "eps", "revenue", "quarter", "q1", "q2", "q3", "q4", "fiscal", "guidance",
    "forecast",
];

const MERGER_KEYWORDS: &[&str] = &["merger", "acquisition", "takeover", "buyout", "deal", "offer"];

const PRODUCT_KEYWORDS: &[&str] = &["launch", "release", "product", "service", "unveil", "announce"];

const MANAGEMENT_KEYWORDS: &[&str] =
    &["ceo", "cfo", "executive", "board", "director", "resign", "appoint"];

/// Event category a headline can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Earnings,
    Merger,
    Product,
    Management,
}

impl EventCategory {
    pub const ALL: [Self; 4] = [Self::Earnings, Self::Merger, Self::Product, Self::Management];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Earnings => EARNINGS_KEYWORDS,
            Self::Merger => MERGER_KEYWORDS,
            Self::Product => PRODUCT_KEYWORDS,
            Self::Management => MANAGEMENT_KEYWORDS,
        }
    }

    /// Whether lowercased text mentions this category.
    pub fn matches(self, text_lower: &str) -> bool {
        any_keyword(text_lower, self.keywords())
    }
}

/// Substring match of any keyword against already-lowercased text.
pub fn any_keyword(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(kw))
}

/// Count of keywords present in already-lowercased text.
pub fn keyword_count(text_lower: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|kw| text_lower.contains(*kw)).count()
}
