pub mod error;
pub mod models;
pub mod sources;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use models::SentimentModel;
pub use sources::NewsSource;
pub use storage::BookmarkStorage;
pub use types::{
    Article, BiasAnalysis, Bookmark, Category, CategoryFilter, Headlines, NewsQuery, NewsResponse,
    Preferences, RawArticle, Readability, Sentiment, TopicCount, ViewMode,
};
