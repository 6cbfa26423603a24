use std::fmt;
use std::sync::Arc;

use nb_core::{Article, BiasAnalysis, Readability, Sentiment, SentimentModel};
use tracing::warn;

use crate::bias::{detect_bias, unknown_bias};
use crate::keywords::{extract_keywords, DEFAULT_KEYWORDS};
use crate::readability::readability;
use crate::summary::{key_quotes, summarize, MAX_QUOTES, SUMMARY_SENTENCES};

/// Subjectivity above which an article reads as opinion rather than reporting.
pub const OPINION_THRESHOLD: f64 = 0.6;

/// Everything the annotator attaches to one article.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub content_type: String,
    pub readability: Readability,
    pub bias: BiasAnalysis,
    pub keywords: Vec<String>,
    pub key_quotes: Vec<String>,
    pub ai_summary: String,
}

impl Analysis {
    pub fn apply(self, article: &mut Article) {
        article.sentiment = Some(self.sentiment);
        article.content_type = Some(self.content_type);
        article.readability = Some(self.readability);
        article.bias_analysis = Some(self.bias);
        article.keywords = Some(self.keywords);
        article.key_quotes = Some(self.key_quotes);
        article.ai_summary = Some(self.ai_summary);
    }
}

pub fn content_type(subjectivity: f64) -> &'static str {
    if subjectivity > OPINION_THRESHOLD {
        "opinion/editorial"
    } else {
        "factual"
    }
}

pub struct Annotator {
    model: Arc<dyn SentimentModel>,
}

impl fmt::Debug for Annotator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Annotator")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Annotator {
    pub fn new(model: Arc<dyn SentimentModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Analyse an article from its title and description. Sentiment-dependent
    /// fields fall back to neutral values when the model fails.
    pub async fn analyze(&self, title: &str, description: &str) -> Analysis {
        let full_text = format!("{} {}", title, description).trim().to_string();
        let body = if description.is_empty() { title } else { description };

        let (sentiment, content_type, bias) = match self.model.analyze(&full_text).await {
            Ok(sentiment) => (
                sentiment,
                content_type(sentiment.subjectivity).to_string(),
                detect_bias(&full_text, sentiment.subjectivity),
            ),
            Err(e) => {
                warn!("Sentiment analysis failed: {}", e);
                (Sentiment::new(0.0, 0.5), "unknown".to_string(), unknown_bias())
            }
        };

        Analysis {
            sentiment,
            content_type,
            readability: readability(&full_text),
            bias,
            keywords: extract_keywords(&full_text, DEFAULT_KEYWORDS),
            key_quotes: key_quotes(body, MAX_QUOTES),
            ai_summary: summarize(body, SUMMARY_SENTENCES),
        }
    }
}
