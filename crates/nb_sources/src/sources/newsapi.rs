use std::fmt;

use async_trait::async_trait;
use nb_core::{Error, Headlines, NewsQuery, NewsSource, RawArticle, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::config::NewsApiConfig;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiResponse {
    #[serde(default)]
    articles: Vec<ApiArticle>,
    total_results: Option<usize>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
    code: Option<String>,
}

#[derive(Deserialize)]
struct ApiSource {
    name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiArticle {
    source: Option<ApiSource>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: Option<String>,
}

impl From<ApiArticle> for RawArticle {
    fn from(a: ApiArticle) -> Self {
        RawArticle {
            title: a.title,
            url: a.url,
            source: a.source.and_then(|s| s.name),
            description: a.description,
            published_at: a.published_at,
            url_to_image: a.url_to_image,
        }
    }
}

/// Top headlines from newsapi.org (or anything speaking its protocol).
pub struct NewsApiSource {
    client: Client,
    config: NewsApiConfig,
}

impl NewsApiSource {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &NewsApiConfig {
        &self.config
    }

    fn params(&self, query: &NewsQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apiKey", self.config.api_key.clone()),
            ("language", self.config.language.clone()),
            ("pageSize", self.config.page_size.to_string()),
            ("page", query.page.to_string()),
        ];
        if let Some(category) = query.category.category() {
            params.push(("category", category.as_str().to_string()));
        }
        if let Some(search) = &query.search {
            params.push(("q", search.clone()));
        }
        params
    }
}

impl fmt::Debug for NewsApiSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiSource")
            .field("client", &"<reqwest::Client>")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "NewsAPI"
    }

    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Headlines> {
        info!("📡 Fetching {} headlines (page {})", query.category.as_str(), query.page);
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&self.params(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiError>(&body)
                .ok()
                .map(|e| format!("{}: {}", e.code.unwrap_or_default(), e.message.unwrap_or_default()))
                .unwrap_or(body);
            return Err(Error::Upstream(format!("News API returned {}: {}", status, detail)));
        }

        let data: ApiResponse = response.json().await?;
        info!("📰 Got {} articles from NewsAPI", data.articles.len());
        Ok(Headlines {
            total: data.total_results,
            articles: data.articles.into_iter().map(RawArticle::from).collect(),
        })
    }
}
