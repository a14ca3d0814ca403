//! Event detection: per-category signals, news-flow analysis, and the
//! regime-filtered composite event signal.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{Headline, PriceSeries, VolatilityRegime};
use crate::events::sentiment::{tone_adjusted, SentimentScorer};
use crate::events::taxonomy::EventCategory;
use crate::indicators::mean;

/// Detection result for one event category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDetection {
    pub detected: bool,
    /// Discrete signal in -2..=2.
    pub signal: i32,
    /// Average tone-adjusted sentiment of the matching headlines.
    pub sentiment: f64,
}

/// Headline-flow intensity and sentiment trend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsFlow {
    /// Headline count over distinct headlines; duplicates inflate this.
    pub intensity: f64,
    /// Recent-window average sentiment minus the older average.
    pub sentiment_trend: f64,
    pub recent_sentiment: f64,
    pub total_headlines: usize,
}

/// Price reaction around an event bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventImpact {
    pub pre_event_return: f64,
    pub post_event_return: f64,
    pub momentum_shift: f64,
}

/// Composite event-driven signal for one asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSignal {
    pub earnings: CategoryDetection,
    pub merger: CategoryDetection,
    pub product: CategoryDetection,
    pub management: CategoryDetection,
    pub flow: NewsFlow,
    /// Sum of category signals plus flow adjustments, clamped to [-5, 5].
    pub composite: i32,
}

impl EventSignal {
    /// Scale the composite by the market volatility regime: conviction is
    /// damped exactly when broad-market risk is elevated.
    pub fn regime_filtered(&self, regime: VolatilityRegime) -> f64 {
        let multiplier = match regime {
            VolatilityRegime::High => 0.5,
            VolatilityRegime::Low => 1.2,
            VolatilityRegime::Normal => 1.0,
        };
        self.composite as f64 * multiplier
    }
}

/// Stateless event detector over a fixed keyword taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct EventDetector {
    /// Short horizon (in bars) for event price-reaction checks.
    event_window: usize,
}

impl EventDetector {
    pub fn new(event_window: usize) -> Self {
        assert!(event_window >= 1, "event_window must be >= 1");
        Self { event_window }
    }

    /// Tone-adjusted sentiment of headlines matching a category.
    fn category_sentiments(
        &self,
        headlines: &[Headline],
        category: EventCategory,
        scorer: &dyn SentimentScorer,
    ) -> Vec<f64> {
        headlines
            .iter()
            .filter(|h| category.matches(&h.text.to_lowercase()))
            .map(|h| tone_adjusted(&h.text, scorer.score(&h.text)))
            .collect()
    }

    /// Earnings events: sentiment coupled with the short-horizon price
    /// reaction when enough history exists.
    pub fn detect_earnings(
        &self,
        headlines: &[Headline],
        series: &PriceSeries,
        scorer: &dyn SentimentScorer,
    ) -> CategoryDetection {
        let sentiments = self.category_sentiments(headlines, EventCategory::Earnings, scorer);
        if sentiments.is_empty() {
            return CategoryDetection::default();
        }
        let sentiment = mean(&sentiments);

        let closes = series.closes();
        let signal = match recent_return(&closes, self.event_window) {
            Some(ret) => {
                if sentiment > 0.3 && ret > 0.03 {
                    2
                } else if sentiment > 0.0 && ret > 0.0 {
                    1
                } else if sentiment < -0.3 && ret < -0.03 {
                    -2
                } else if sentiment < 0.0 && ret < 0.0 {
                    -1
                } else {
                    0
                }
            }
            // No usable price reaction: sentiment alone, at reduced conviction.
            None => {
                if sentiment > 0.3 {
                    1
                } else if sentiment < -0.3 {
                    -1
                } else {
                    0
                }
            }
        };

        CategoryDetection {
            detected: true,
            signal,
            sentiment,
        }
    }

    /// Merger & acquisition events: typically price jumps, so a detection
    /// is never negative.
    pub fn detect_merger(
        &self,
        headlines: &[Headline],
        scorer: &dyn SentimentScorer,
    ) -> CategoryDetection {
        let sentiments = self.category_sentiments(headlines, EventCategory::Merger, scorer);
        if sentiments.is_empty() {
            return CategoryDetection::default();
        }
        let sentiment = mean(&sentiments);
        CategoryDetection {
            detected: true,
            signal: if sentiment > 0.2 { 2 } else { 1 },
            sentiment,
        }
    }

    /// Product launch events.
    pub fn detect_product(
        &self,
        headlines: &[Headline],
        scorer: &dyn SentimentScorer,
    ) -> CategoryDetection {
        let sentiments = self.category_sentiments(headlines, EventCategory::Product, scorer);
        if sentiments.is_empty() {
            return CategoryDetection::default();
        }
        let sentiment = mean(&sentiments);
        CategoryDetection {
            detected: true,
            signal: if sentiment > 0.2 { 1 } else { 0 },
            sentiment,
        }
    }

    /// Management change events. A resignation dominates the sentiment.
    pub fn detect_management(
        &self,
        headlines: &[Headline],
        scorer: &dyn SentimentScorer,
    ) -> CategoryDetection {
        let matching: Vec<&Headline> = headlines
            .iter()
            .filter(|h| EventCategory::Management.matches(&h.text.to_lowercase()))
            .collect();
        if matching.is_empty() {
            return CategoryDetection::default();
        }
        let sentiments: Vec<f64> = matching
            .iter()
            .map(|h| tone_adjusted(&h.text, scorer.score(&h.text)))
            .collect();
        let sentiment = mean(&sentiments);

        let signal = if matching
            .iter()
            .any(|h| h.text.to_lowercase().contains("resign"))
        {
            -1
        } else if sentiment > 0.2 {
            1
        } else {
            0
        };

        CategoryDetection {
            detected: true,
            signal,
            sentiment,
        }
    }

    /// Headline-flow intensity and the shift between recent and older
    /// sentiment.
    pub fn news_flow(&self, headlines: &[Headline], scorer: &dyn SentimentScorer) -> NewsFlow {
        if headlines.is_empty() {
            return NewsFlow::default();
        }
        let sentiments: Vec<f64> = headlines
            .iter()
            .map(|h| tone_adjusted(&h.text, scorer.score(&h.text)))
            .collect();

        let recent_window = self.event_window.min(sentiments.len());
        let split = sentiments.len() - recent_window;
        let recent_avg = mean(&sentiments[split..]);
        let historical_avg = if split > 0 {
            mean(&sentiments[..split])
        } else {
            recent_avg
        };

        let distinct: HashSet<&str> = headlines.iter().map(|h| h.text.as_str()).collect();
        NewsFlow {
            intensity: headlines.len() as f64 / distinct.len().max(1) as f64,
            sentiment_trend: recent_avg - historical_avg,
            recent_sentiment: recent_avg,
            total_headlines: headlines.len(),
        }
    }

    /// Composite event signal combining all categories and the news flow.
    pub fn composite(
        &self,
        headlines: &[Headline],
        series: &PriceSeries,
        scorer: &dyn SentimentScorer,
    ) -> EventSignal {
        let earnings = self.detect_earnings(headlines, series, scorer);
        let merger = self.detect_merger(headlines, scorer);
        let product = self.detect_product(headlines, scorer);
        let management = self.detect_management(headlines, scorer);
        let flow = self.news_flow(headlines, scorer);

        let mut total = earnings.signal + merger.signal + product.signal + management.signal;
        if flow.sentiment_trend > 0.2 {
            total += 1;
        } else if flow.sentiment_trend < -0.2 {
            total -= 1;
        }
        if flow.intensity > 2.0 {
            total += 1;
        }

        EventSignal {
            earnings,
            merger,
            product,
            management,
            flow,
            composite: total.clamp(-5, 5),
        }
    }

    /// Price momentum before and after an event bar, to validate whether an
    /// event had real price impact.
    pub fn price_impact(
        &self,
        series: &PriceSeries,
        event_index: usize,
        lookback: usize,
        lookforward: usize,
    ) -> EventImpact {
        let closes = series.closes();
        if event_index < lookback || event_index + lookforward >= closes.len() {
            return EventImpact::default();
        }
        let pre = closes[event_index - lookback];
        let at = closes[event_index];
        let post = closes[event_index + lookforward];
        let pre_event_return = if pre > 0.0 { (at - pre) / pre } else { 0.0 };
        let post_event_return = if at > 0.0 { (post - at) / at } else { 0.0 };
        EventImpact {
            pre_event_return,
            post_event_return,
            momentum_shift: post_event_return - pre_event_return,
        }
    }
}

/// Return over the trailing `window` bars; None without enough history.
fn recent_return(closes: &[f64], window: usize) -> Option<f64> {
    if closes.len() < window {
        return None;
    }
    let base = closes[closes.len() - window];
    let last = *closes.last()?;
    if base > 0.0 && base.is_finite() && last.is_finite() {
        Some((last - base) / base)
    } else {
        None
    }
}
