use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use nb_analysis::{trending_topics, Annotator};
use nb_core::{Article, NewsQuery, NewsResponse, NewsSource, RawArticle, Result, SentimentModel};
use tracing::{info, warn};

use nb_analysis::keywords::TRENDING_TOPICS;

pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Combined title + description shorter than this is not worth analysing.
const MIN_TEXT_LEN: usize = 10;

/// Fetches a page of headlines and turns it into annotated articles.
pub struct NewsService {
    source: Arc<dyn NewsSource>,
    annotator: Arc<Annotator>,
}

struct Candidate {
    title: String,
    url: String,
    description: String,
    raw: RawArticle,
}

fn candidate(raw: RawArticle) -> Option<Candidate> {
    let title = raw.title.as_deref().map(str::trim).unwrap_or_default().to_string();
    let url = raw.url.clone().unwrap_or_default();
    if title.is_empty() || url.is_empty() {
        warn!("Skipping article with missing required fields");
        return None;
    }
    let description = raw.description.as_deref().map(str::trim).unwrap_or_default().to_string();
    if format!("{} {}", title, description).trim().chars().count() < MIN_TEXT_LEN {
        warn!("Skipping article with insufficient text");
        return None;
    }
    Some(Candidate { title, url, description, raw })
}

impl NewsService {
    pub fn new(source: Arc<dyn NewsSource>, model: Arc<dyn SentimentModel>) -> Self {
        Self {
            source,
            annotator: Arc::new(Annotator::new(model)),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn fetch_news(&self, query: &NewsQuery) -> Result<NewsResponse> {
        let category = query.category.as_str().to_string();
        info!("🦗 Starting news fetching for category: {}", category);
        let headlines = self.source.fetch_headlines(query).await?;

        let candidates: Vec<Candidate> = headlines.articles.into_iter().filter_map(candidate).collect();
        let all_text = candidates
            .iter()
            .map(|c| format!("{} {}", c.title, c.description).trim().to_string())
            .collect::<Vec<_>>()
            .join(" ");

        let futures = candidates.into_iter().map(|c| {
            let annotator = self.annotator.clone();
            let category = category.clone();
            async move {
                let analysis = annotator.analyze(&c.title, &c.description).await;
                let mut article = Article {
                    title: c.title,
                    url: c.url,
                    source: c.raw.source.unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                    timestamp: c.raw.published_at.unwrap_or_else(|| Utc::now().to_rfc3339()),
                    summary: c.description,
                    category,
                    url_to_image: c.raw.url_to_image,
                    sentiment: None,
                    ai_summary: None,
                    keywords: None,
                    content_type: None,
                    readability: None,
                    bias_analysis: None,
                    key_quotes: None,
                };
                analysis.apply(&mut article);
                info!("✨ Added article: {}", article.title);
                article
            }
        });
        let articles: Vec<Article> = join_all(futures).await;

        if articles.is_empty() {
            warn!("No articles were successfully processed");
            return Ok(NewsResponse {
                articles,
                total: 0,
                category,
                trending_topics: Some(Vec::new()),
            });
        }

        Ok(NewsResponse {
            total: headlines.total.unwrap_or(articles.len()),
            articles,
            category,
            trending_topics: Some(trending_topics(&all_text, TRENDING_TOPICS)),
        })
    }
}
