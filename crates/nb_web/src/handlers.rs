use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use nb_core::{Article, Bookmark, Category, CategoryFilter, NewsQuery, NewsResponse, Preferences};
use nb_layout::render_scene;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

const MAX_CANVAS: f64 = 8192.0;

#[derive(Debug, Default, Deserialize)]
pub struct NewsParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

/// Query values arrive as strings so a malformed one gets the same 422
/// `{"detail"}` body as any other invalid parameter.
fn parse_param<T: std::str::FromStr>(value: &str, name: &str) -> ApiResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::unprocessable(format!("{} is not valid: {}", name, value)))
}

fn news_query(category: Option<&str>, search: Option<String>, page: Option<&str>) -> ApiResult<NewsQuery> {
    let category = match category {
        Some(c) => c.parse::<CategoryFilter>()?,
        None => CategoryFilter::default(),
    };
    let page: i64 = match page {
        Some(p) => parse_param(p, "page")?,
        None => 1,
    };
    if page < 1 {
        return Err(ApiError::unprocessable("page must be greater than or equal to 1"));
    }
    let page = u32::try_from(page).map_err(|_| ApiError::unprocessable("page is too large"))?;
    Ok(NewsQuery::new(category, search, page)?)
}

impl NewsParams {
    fn query(self) -> ApiResult<NewsQuery> {
        news_query(self.category.as_deref(), self.search, self.page.as_deref())
    }
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<NewsParams>,
) -> ApiResult<Json<NewsResponse>> {
    let query = params.query()?;
    Ok(Json(state.news.fetch_news(&query).await?))
}

pub async fn get_categories() -> Json<Value> {
    Json(json!({ "categories": Category::names() }))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": Utc::now().to_rfc3339() }))
}

#[derive(Debug, Default, Deserialize)]
pub struct BubbleParams {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub dark: Option<String>,
    pub format: Option<String>,
}

/// The current page of news as a settled bubble universe, as SVG or as the
/// scene model in JSON (`format=json`).
pub async fn get_bubbles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BubbleParams>,
) -> ApiResult<Response> {
    let query = news_query(params.category.as_deref(), params.search.clone(), params.page.as_deref())?;
    let mut config = state.layout.clone();
    if let Some(width) = params.width.as_deref() {
        config.width = canvas_dimension(parse_param(width, "width")?, "width")?;
    }
    if let Some(height) = params.height.as_deref() {
        config.height = canvas_dimension(parse_param(height, "height")?, "height")?;
    }
    if let Some(dark) = params.dark.as_deref() {
        config.dark_mode = parse_param(dark, "dark")?;
    }

    let news = state.news.fetch_news(&query).await?;
    info!("🫧 Rendering {} bubbles at {}x{}", news.articles.len(), config.width, config.height);
    let ticks = state.layout_ticks;
    let scene = tokio::task::spawn_blocking(move || render_scene(&news.articles, config, ticks))
        .await
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    match params.format.as_deref() {
        Some("json") => Ok(Json(scene).into_response()),
        None | Some("svg") => Ok(([(header::CONTENT_TYPE, "image/svg+xml")], scene.to_svg()).into_response()),
        Some(other) => Err(ApiError::unprocessable(format!("Unknown format: {}", other))),
    }
}

fn canvas_dimension(value: f64, name: &str) -> ApiResult<f64> {
    if value.is_finite() && value > 0.0 && value <= MAX_CANVAS {
        Ok(value)
    } else {
        Err(ApiError::unprocessable(format!("{} must be in (0, {}]", name, MAX_CANVAS)))
    }
}

pub async fn list_bookmarks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Bookmark>>> {
    Ok(Json(state.storage.list().await?))
}

pub async fn create_bookmark(
    State(state): State<Arc<AppState>>,
    Json(article): Json<Article>,
) -> ApiResult<(StatusCode, Json<Bookmark>)> {
    if article.url.trim().is_empty() {
        return Err(ApiError::unprocessable("article url is required"));
    }
    let bookmark = state.storage.add(&article).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

#[derive(Debug, Deserialize)]
pub struct BookmarkParams {
    pub url: String,
}

pub async fn delete_bookmark(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookmarkParams>,
) -> ApiResult<StatusCode> {
    if state.storage.remove(&params.url).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("No bookmark for {}", params.url)))
    }
}

pub async fn get_preferences(State(state): State<Arc<AppState>>) -> ApiResult<Json<Preferences>> {
    Ok(Json(state.storage.preferences().await?))
}

pub async fn put_preferences(
    State(state): State<Arc<AppState>>,
    Json(preferences): Json<Preferences>,
) -> ApiResult<Json<Preferences>> {
    state.storage.set_preferences(preferences).await?;
    Ok(Json(preferences))
}
