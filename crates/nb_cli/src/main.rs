use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use nb_analysis::LexiconSentiment;
use nb_core::{Article, Category, CategoryFilter, NewsQuery, NewsResponse};
use nb_layout::{render_scene, LayoutConfig};
use nb_sources::{create_source, NewsApiConfig, NewsService};
use nb_web::AppState;
use serde::Deserialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nb", author, version, about = "Annotated headlines and a bubble view of the news", long_about = None)]
pub struct Cli {
    #[arg(long, default_value = "memory", help = "Bookmark storage backend. Available: memory (default), file")]
    storage: String,
    #[arg(long, help = "Bookmark file for the file backend (default: bookmarks.json)")]
    storage_path: Option<PathBuf>,
    #[arg(long, env = "NEWS_API_KEY", hide_env_values = true)]
    news_api_key: Option<String>,
    #[arg(long)]
    news_api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct FetchArgs {
    /// One of the listed categories, or "all"
    #[arg(long, default_value = "general")]
    category: String,
    #[arg(long)]
    search: Option<String>,
    #[arg(long, default_value_t = 1)]
    page: u32,
    /// News source: newsapi (default), reuters
    #[arg(long, default_value = "newsapi")]
    source: String,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Run the REST API
    Serve {
        #[arg(long, default_value = "127.0.0.1:8000")]
        addr: SocketAddr,
    },
    /// Fetch and annotate one page of headlines, printed as JSON
    Fetch {
        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Settle a bubble universe and write it as SVG
    Bubbles {
        /// Read articles from a JSON file instead of fetching them
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        fetch: FetchArgs,
        #[arg(long, default_value_t = 1200.0)]
        width: f64,
        #[arg(long, default_value_t = 800.0)]
        height: f64,
        #[arg(long, default_value_t = 300)]
        ticks: usize,
        #[arg(long)]
        dark: bool,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List the news categories
    Categories,
    Bookmarks {
        #[command(subcommand)]
        command: BookmarkCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
enum BookmarkCommands {
    List,
    Remove { url: String },
}

/// Either a saved `NewsResponse` or a bare article array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ArticleFile {
    Response(NewsResponse),
    Articles(Vec<Article>),
}

fn read_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file: ArticleFile =
        serde_json::from_str(&raw).with_context(|| format!("{} holds neither a news response nor an article list", path.display()))?;
    Ok(match file {
        ArticleFile::Response(response) => response.articles,
        ArticleFile::Articles(articles) => articles,
    })
}

fn news_config(cli: &Cli) -> NewsApiConfig {
    let config = NewsApiConfig::new(cli.news_api_key.clone());
    match &cli.news_api_url {
        Some(url) => config.with_url(url.clone()),
        None => config,
    }
}

fn news_service(cli: &Cli, source: &str) -> Result<NewsService> {
    let config = news_config(cli);
    if source.eq_ignore_ascii_case("newsapi") && !config.has_real_key() {
        warn!("⚠️ No NEWS_API_KEY set, requests will likely be rejected");
    }
    let source = create_source(source, config)?;
    info!("📡 News source initialized (using {})", source.name());
    Ok(NewsService::new(source, Arc::new(LexiconSentiment::new())))
}

fn query_for(fetch: &FetchArgs) -> Result<NewsQuery> {
    let category: CategoryFilter = fetch.category.parse()?;
    Ok(NewsQuery::new(category, fetch.search.clone(), fetch.page)?)
}

fn layout_config(width: f64, height: f64, dark: bool) -> Result<LayoutConfig> {
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        bail!("Canvas size must be positive, got {}x{}", width, height);
    }
    Ok(LayoutConfig::default().with_size(width, height).with_dark_mode(dark))
}

async fn fetch_news(cli: &Cli, fetch: &FetchArgs) -> Result<NewsResponse> {
    let query = query_for(fetch)?;
    let service = news_service(cli, &fetch.source)?;
    Ok(service.fetch_news(&query).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Serve { addr } => {
            let storage = nb_storage::create_storage(&cli.storage, cli.storage_path.clone()).await?;
            let news = Arc::new(news_service(&cli, "newsapi")?);
            nb_web::serve(AppState::new(news, storage), *addr).await?;
        }
        Commands::Fetch { fetch } => {
            let response = fetch_news(&cli, fetch).await?;
            info!("✨ Fetched {} articles", response.articles.len());
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Bubbles { input, fetch, width, height, ticks, dark, output } => {
            let config = layout_config(*width, *height, *dark)?;
            let articles = match input {
                Some(path) => read_articles(path)?,
                None => fetch_news(&cli, fetch).await?.articles,
            };
            info!("🫧 Settling {} bubbles for up to {} ticks", articles.len(), ticks);
            let svg = render_scene(&articles, config, *ticks).to_svg();
            match output {
                Some(path) => {
                    std::fs::write(path, svg).with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("💾 Wrote {}", path.display());
                }
                None => println!("{}", svg),
            }
        }
        Commands::Categories => {
            for name in Category::names() {
                println!("{}", name);
            }
        }
        Commands::Bookmarks { command } => {
            let storage = nb_storage::create_storage(&cli.storage, cli.storage_path.clone()).await?;
            match command {
                BookmarkCommands::List => {
                    println!("{}", serde_json::to_string_pretty(&storage.list().await?)?);
                }
                BookmarkCommands::Remove { url } => {
                    if !storage.remove(url).await? {
                        bail!("No bookmark for {}", url);
                    }
                    info!("🗑️ Removed bookmark {}", url);
                }
            }
        }
    }

    Ok(())
}
