use async_trait::async_trait;
use nb_core::{Error, Headlines, NewsQuery, NewsSource, RawArticle, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::info;
use url::Url;

pub const REUTERS_BASE_URL: &str = "https://www.reuters.com";
const WORLD_PATH: &str = "/world/";
const MAX_ARTICLES: usize = 10;

/// Headlines scraped from the Reuters world listing page. Only the first
/// page exists; category is ignored and search filters titles locally.
#[derive(Debug, Clone)]
pub struct ReutersSource {
    client: Client,
    base_url: String,
}

impl ReutersSource {
    pub fn new() -> Self {
        Self::with_base_url(REUTERS_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl Default for ReutersSource {
    fn default() -> Self {
        Self::new()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Scraping(format!("Invalid selector {}: {}", css, e)))
}

fn text_of(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Pull up to ten headline cards out of a listing page.
pub fn parse_listing(html: &str, base_url: &str) -> Result<Vec<RawArticle>> {
    let document = Html::parse_document(html);
    let article_sel = selector("article")?;
    let headline_sel = selector("h3")?;
    let link_sel = selector("a")?;
    let summary_sel = selector("p")?;
    let base = Url::parse(base_url)?;

    let mut items = Vec::new();
    for article in document.select(&article_sel).take(MAX_ARTICLES) {
        let title = match article.select(&headline_sel).next().map(text_of) {
            Some(title) if !title.is_empty() => title,
            _ => continue,
        };
        let url = article
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| base.join(href).ok())
            .map(|u| u.to_string());
        let description = article.select(&summary_sel).next().map(text_of);

        items.push(RawArticle {
            title: Some(title),
            url,
            source: Some("Reuters".to_string()),
            description,
            published_at: None,
            url_to_image: None,
        });
    }
    Ok(items)
}

#[async_trait]
impl NewsSource for ReutersSource {
    fn name(&self) -> &str {
        "Reuters"
    }

    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Headlines> {
        if query.page > 1 {
            return Ok(Headlines::default());
        }
        let listing = format!("{}{}", self.base_url.trim_end_matches('/'), WORLD_PATH);
        info!("🗞️ Scraping {}", listing);
        let html = self.client.get(&listing).send().await?.error_for_status()?.text().await?;

        let mut articles = parse_listing(&html, &self.base_url)?;
        if let Some(search) = &query.search {
            let needle = search.to_lowercase();
            articles.retain(|a| a.title.as_deref().is_some_and(|t| t.to_lowercase().contains(&needle)));
        }
        Ok(Headlines {
            total: Some(articles.len()),
            articles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum::Router;

    const LISTING: &str = r#"
        <html><body>
          <article><h3> Ceasefire talks resume </h3><a href="/world/ceasefire-talks">link</a><p>Envoys meet again.</p></article>
          <article><h3>   </h3><a href="/world/blank">link</a></article>
          <article><h3>Floods hit coast</h3></article>
          <article><h3>Summit ends</h3><a href="https://elsewhere.example/summit">x</a></article>
        </body></html>
    "#;

    #[test]
    fn test_parse_listing() {
        let items = parse_listing(LISTING, REUTERS_BASE_URL).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].title.as_deref(), Some("Ceasefire talks resume"));
        assert_eq!(items[0].url.as_deref(), Some("https://www.reuters.com/world/ceasefire-talks"));
        assert_eq!(items[0].description.as_deref(), Some("Envoys meet again."));
        assert_eq!(items[1].url, None);
        assert_eq!(items[1].description, None);
        assert_eq!(items[2].url.as_deref(), Some("https://elsewhere.example/summit"));
    }

    #[test]
    fn test_parse_listing_caps_at_ten() {
        let html: String = (0..15)
            .map(|i| format!("<article><h3>Story {}</h3><a href=\"/s/{}\">x</a></article>", i, i))
            .collect();
        assert_eq!(parse_listing(&html, REUTERS_BASE_URL).unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_fetch_filters_by_search() {
        let app = Router::new().route("/world/", get(|| async { axum::response::Html(LISTING) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let source = ReutersSource::with_base_url(format!("http://{}", addr));
        let query = NewsQuery::new(Default::default(), Some("FLOODS".to_string()), 1).unwrap();
        let headlines = source.fetch_headlines(&query).await.unwrap();
        assert_eq!(headlines.articles.len(), 1);
        assert_eq!(headlines.total, Some(1));

        let second = NewsQuery::new(Default::default(), None, 2).unwrap();
        assert!(source.fetch_headlines(&second).await.unwrap().articles.is_empty());
    }
}
