//! Visual encodings of article metadata: bubble size and fill color.

use nb_core::Article;
use serde::{Deserialize, Serialize};

/// Polarity beyond which an article counts as positive (or, negated, negative).
pub const POLARITY_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    /// No sentiment was attached to the article.
    Unknown,
}

impl Tone {
    pub fn of(article: &Article) -> Tone {
        match article.sentiment {
            None => Tone::Unknown,
            Some(s) if s.polarity > POLARITY_THRESHOLD => Tone::Positive,
            Some(s) if s.polarity < -POLARITY_THRESHOLD => Tone::Negative,
            Some(_) => Tone::Neutral,
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Tone::Positive => POSITIVE_COLOR,
            Tone::Negative => NEGATIVE_COLOR,
            Tone::Neutral => NEUTRAL_COLOR,
            Tone::Unknown => DEFAULT_COLOR,
        }
    }
}

pub const POSITIVE_COLOR: &str = "#4ade80";
pub const NEGATIVE_COLOR: &str = "#f87171";
pub const NEUTRAL_COLOR: &str = "#94a3b8";
pub const DEFAULT_COLOR: &str = "#60a5fa";

pub fn color_for(article: &Article) -> &'static str {
    Tone::of(article).color()
}

pub fn bias_multiplier(article: &Article) -> f64 {
    article
        .bias_analysis
        .as_ref()
        .map_or(1.0, |b| 1.0 - b.bias_score / 20.0)
}

pub fn readability_multiplier(article: &Article) -> f64 {
    article.readability.as_ref().map_or(1.0, |r| r.score / 100.0)
}

/// `base * bias * readability`, floored at `min_radius`.
///
/// A bias score of 20 or more, or a readability score at or below zero, would
/// otherwise produce an invisible or inverted bubble.
pub fn radius_for(article: &Article, base: f64, min_radius: f64) -> f64 {
    let radius = base * bias_multiplier(article) * readability_multiplier(article);
    if radius.is_finite() {
        radius.max(min_radius)
    } else {
        min_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BASE_RADIUS, MIN_RADIUS};
    use nb_core::{BiasAnalysis, Readability, Sentiment};

    fn article(polarity: Option<f64>, bias: Option<f64>, readability: Option<f64>) -> Article {
        let mut article = Article::new("Title", "https://example.com", "Example");
        article.sentiment = polarity.map(|p| Sentiment::new(p, 0.5));
        article.bias_analysis = bias.map(|score| BiasAnalysis {
            bias_score: score,
            bias_level: "low".to_string(),
            bias_factors: Default::default(),
        });
        article.readability = readability.map(|score| Readability {
            score,
            reading_level: "standard".to_string(),
            avg_sentence_length: 15.0,
        });
        article
    }

    #[test]
    fn test_neutral_metrics_keep_base_radius() {
        let a = article(Some(0.0), Some(0.0), Some(100.0));
        assert_eq!(radius_for(&a, BASE_RADIUS, MIN_RADIUS), BASE_RADIUS);

        let bare = article(None, None, None);
        assert_eq!(radius_for(&bare, BASE_RADIUS, MIN_RADIUS), BASE_RADIUS);
    }

    #[test]
    fn test_bias_shrinks_and_readability_grows() {
        let biased = article(None, Some(10.0), None);
        assert_eq!(radius_for(&biased, BASE_RADIUS, MIN_RADIUS), BASE_RADIUS * 0.5);

        let hard = article(None, None, Some(50.0));
        let easy = article(None, None, Some(90.0));
        assert!(radius_for(&hard, BASE_RADIUS, MIN_RADIUS) < radius_for(&easy, BASE_RADIUS, MIN_RADIUS));
    }

    #[test]
    fn test_radius_floor() {
        let extreme = article(None, Some(25.0), None);
        assert_eq!(radius_for(&extreme, BASE_RADIUS, MIN_RADIUS), MIN_RADIUS);

        let unreadable = article(None, None, Some(0.0));
        assert_eq!(radius_for(&unreadable, BASE_RADIUS, MIN_RADIUS), MIN_RADIUS);

        let nan = article(None, None, Some(f64::NAN));
        assert_eq!(radius_for(&nan, BASE_RADIUS, MIN_RADIUS), MIN_RADIUS);
    }

    #[test]
    fn test_tone_classification() {
        assert_eq!(color_for(&article(Some(0.31), None, None)), POSITIVE_COLOR);
        assert_eq!(color_for(&article(Some(-0.31), None, None)), NEGATIVE_COLOR);
        assert_eq!(color_for(&article(Some(0.3), None, None)), NEUTRAL_COLOR);
        assert_eq!(color_for(&article(Some(-0.3), None, None)), NEUTRAL_COLOR);
        assert_eq!(color_for(&article(Some(0.0), None, None)), NEUTRAL_COLOR);
        assert_eq!(color_for(&article(None, None, None)), DEFAULT_COLOR);
        assert_ne!(DEFAULT_COLOR, NEUTRAL_COLOR);
    }
}
