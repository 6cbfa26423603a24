use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Sentiment as reported by a [`SentimentModel`](crate::SentimentModel).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    /// Signed tone in `[-1, 1]`.
    pub polarity: f64,
    /// Opinion vs. fact in `[0, 1]`.
    pub subjectivity: f64,
}

impl Sentiment {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self { polarity, subjectivity }
    }

    pub fn objectivity(&self) -> f64 {
        1.0 - self.subjectivity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasAnalysis {
    pub bias_score: f64,
    pub bias_level: String,
    #[serde(default)]
    pub bias_factors: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Readability {
    pub score: f64,
    pub reading_level: String,
    pub avg_sentence_length: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    pub source: String,
    pub timestamp: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(rename = "urlToImage", default, skip_serializing_if = "Option::is_none")]
    pub url_to_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub readability: Option<Readability>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bias_analysis: Option<BiasAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_quotes: Option<Vec<String>>,
}

fn default_category() -> String {
    Category::General.as_str().to_string()
}

impl Article {
    /// A bare article with no analysis attached.
    pub fn new(title: impl Into<String>, url: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            timestamp: Utc::now().to_rfc3339(),
            summary: String::new(),
            category: default_category(),
            url_to_image: None,
            sentiment: None,
            ai_summary: None,
            keywords: None,
            content_type: None,
            readability: None,
            bias_analysis: None,
            key_quotes: None,
        }
    }
}

/// An article as it arrives from a [`NewsSource`](crate::NewsSource), before annotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
    pub published_at: Option<String>,
    pub url_to_image: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headlines {
    pub articles: Vec<RawArticle>,
    /// Total reported by the upstream, when it reports one.
    pub total: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCount {
    pub topic: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    pub articles: Vec<Article>,
    pub total: usize,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trending_topics: Option<Vec<TopicCount>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    General,
    Business,
    Technology,
    Entertainment,
    Sports,
    Science,
    Health,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::General,
        Category::Business,
        Category::Technology,
        Category::Entertainment,
        Category::Sports,
        Category::Science,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Business => "business",
            Category::Technology => "technology",
            Category::Entertainment => "entertainment",
            Category::Sports => "sports",
            Category::Science => "science",
            Category::Health => "health",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Category::as_str).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidQuery(format!("Unknown category: {}", s)))
    }
}

/// Either one category or every category at once (`all`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(c) => Some(*c),
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::Only(Category::General)
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// A page request against a news source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub category: CategoryFilter,
    pub search: Option<String>,
    pub page: u32,
}

impl NewsQuery {
    pub fn new(category: CategoryFilter, search: Option<String>, page: u32) -> crate::Result<Self> {
        if page < 1 {
            return Err(Error::InvalidQuery("page must be >= 1".to_string()));
        }
        let search = search.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
        Ok(Self { category, search, page })
    }
}

impl Default for NewsQuery {
    fn default() -> Self {
        Self {
            category: CategoryFilter::default(),
            search: None,
            page: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub article: Article,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
    Compact,
    Bubbles,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub view_mode: ViewMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_json_contract() {
        let json = r#"{
            "title": "Markets rally",
            "url": "https://example.com/a",
            "source": "Example",
            "timestamp": "2024-01-01T00:00:00Z",
            "urlToImage": "https://example.com/a.png",
            "sentiment": {"polarity": 0.4, "subjectivity": 0.2}
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.category, "general");
        assert_eq!(article.summary, "");
        assert_eq!(article.url_to_image.as_deref(), Some("https://example.com/a.png"));
        assert!(article.bias_analysis.is_none());
        assert!((article.sentiment.unwrap().objectivity() - 0.8).abs() < 1e-9);

        let back = serde_json::to_value(&article).unwrap();
        assert!(back.get("urlToImage").is_some());
        assert!(back.get("readability").is_none());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("Sports".parse::<Category>().unwrap(), Category::Sports);
        assert!("weather".parse::<Category>().is_err());
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "health".parse::<CategoryFilter>().unwrap().category(),
            Some(Category::Health)
        );
        assert_eq!(Category::names().len(), 7);
    }

    #[test]
    fn test_news_query_validation() {
        assert!(NewsQuery::new(CategoryFilter::All, None, 0).is_err());
        let query = NewsQuery::new(CategoryFilter::All, Some("  ".to_string()), 2).unwrap();
        assert_eq!(query.search, None);
        assert_eq!(query.page, 2);
    }

    #[test]
    fn test_preferences_defaults() {
        let prefs: Preferences = serde_json::from_str("{}").unwrap();
        assert!(!prefs.dark_mode);
        assert_eq!(prefs.view_mode, ViewMode::Grid);
        let prefs: Preferences = serde_json::from_str(r#"{"view_mode":"bubbles"}"#).unwrap();
        assert_eq!(prefs.view_mode, ViewMode::Bubbles);
    }
}
