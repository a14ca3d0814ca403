//! Sentiment scoring seam and headline sentiment aggregation.
//!
//! The actual text scorer is a collaborator: anything that maps text to a
//! score in [-1, 1] plugs in behind `SentimentScorer`. The engine only owns
//! the tone adjustment and the aggregation into per-asset signals.

use crate::domain::{Headline, SentimentSignals};
use crate::events::taxonomy::{keyword_count, NEGATIVE_TONE, POSITIVE_TONE};
use crate::indicators::{mean, sample_std};

/// Text sentiment scorer. Implementations must return scores in [-1, 1].
pub trait SentimentScorer: Send + Sync {
    fn score(&self, text: &str) -> f64;

    fn score_batch(&self, texts: &[&str]) -> Vec<f64> {
        texts.iter().map(|t| self.score(t)).collect()
    }
}

/// Built-in lexicon scorer: net tone-keyword balance.
///
/// Serves as the default scorer and as a deterministic test double for the
/// external NLP collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl SentimentScorer for LexiconScorer {
    fn score(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let pos = keyword_count(&lower, POSITIVE_TONE) as f64;
        let neg = keyword_count(&lower, NEGATIVE_TONE) as f64;
        if pos + neg == 0.0 {
            return 0.0;
        }
        ((pos - neg) / (pos + neg)).clamp(-1.0, 1.0)
    }
}

/// Adjust a base sentiment score by the tone-keyword balance.
///
/// +0.2 when positive keywords strictly outnumber negative ones, -0.2 in
/// the reverse case, unchanged on a tie; result stays in [-1, 1].
pub fn tone_adjusted(text: &str, base: f64) -> f64 {
    let lower = text.to_lowercase();
    let pos = keyword_count(&lower, POSITIVE_TONE);
    let neg = keyword_count(&lower, NEGATIVE_TONE);
    if pos > neg {
        (base + 0.2).min(1.0)
    } else if neg > pos {
        (base - 0.2).max(-1.0)
    } else {
        base
    }
}

/// Aggregate headline sentiment for one asset.
///
/// `momentum` compares the last 5 scores against the earlier ones and needs
/// at least 10 headlines; `strength` is the dispersion across headlines.
pub fn compute_sentiment_signals(
    headlines: &[Headline],
    scorer: &dyn SentimentScorer,
) -> SentimentSignals {
    if headlines.is_empty() {
        return SentimentSignals::default();
    }
    let scores: Vec<f64> = headlines.iter().map(|h| scorer.score(&h.text)).collect();

    let score = mean(&scores);
    let strength = if scores.len() > 1 {
        sample_std(&scores)
    } else {
        0.0
    };
    let momentum = if scores.len() >= 10 {
        let split = scores.len() - 5;
        mean(&scores[split..]) - mean(&scores[..split])
    } else {
        0.0
    };

    SentimentSignals {
        score,
        strength,
        momentum,
    }
}
