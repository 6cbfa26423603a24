use async_trait::async_trait;

use crate::types::{Article, Bookmark, Preferences};
use crate::Result;

#[async_trait]
pub trait BookmarkStorage: Send + Sync {
    /// Save an article, replacing any bookmark with the same url
    async fn add(&self, article: &Article) -> Result<Bookmark>;

    /// Remove a bookmark, returning whether one existed
    async fn remove(&self, url: &str) -> Result<bool>;

    /// All bookmarks, most recently saved first
    async fn list(&self) -> Result<Vec<Bookmark>>;

    async fn contains(&self, url: &str) -> Result<bool> {
        Ok(self.list().await?.iter().any(|b| b.article.url == url))
    }

    async fn preferences(&self) -> Result<Preferences>;

    async fn set_preferences(&self, preferences: Preferences) -> Result<()>;
}
