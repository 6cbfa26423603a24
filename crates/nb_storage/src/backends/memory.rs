use async_trait::async_trait;
use nb_core::{Article, Bookmark, BookmarkStorage, Preferences, Result};
use tokio::sync::RwLock;

use super::StoreState;

/// Bookmarks that live as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    state: RwLock<StoreState>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookmarkStorage for MemoryStorage {
    async fn add(&self, article: &Article) -> Result<Bookmark> {
        Ok(self.state.write().await.add(article))
    }

    async fn remove(&self, url: &str) -> Result<bool> {
        Ok(self.state.write().await.remove(url))
    }

    async fn list(&self) -> Result<Vec<Bookmark>> {
        Ok(self.state.read().await.list())
    }

    async fn preferences(&self) -> Result<Preferences> {
        Ok(self.state.read().await.preferences)
    }

    async fn set_preferences(&self, preferences: Preferences) -> Result<()> {
        self.state.write().await.preferences = preferences;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ViewMode;

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        let first = Article::new("First", "https://e.com/1", "Wire");
        let second = Article::new("Second", "https://e.com/2", "Wire");

        storage.add(&first).await.unwrap();
        storage.add(&second).await.unwrap();
        storage.add(&first).await.unwrap();

        let urls: Vec<String> = storage.list().await.unwrap().into_iter().map(|b| b.article.url).collect();
        assert_eq!(urls, vec!["https://e.com/1", "https://e.com/2"]);
        assert!(storage.contains("https://e.com/2").await.unwrap());

        assert!(storage.remove("https://e.com/2").await.unwrap());
        assert!(!storage.remove("https://e.com/2").await.unwrap());
        assert!(!storage.contains("https://e.com/2").await.unwrap());
    }

    #[tokio::test]
    async fn test_preferences() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.preferences().await.unwrap(), Preferences::default());
        let prefs = Preferences { dark_mode: true, view_mode: ViewMode::Bubbles };
        storage.set_preferences(prefs).await.unwrap();
        assert_eq!(storage.preferences().await.unwrap(), prefs);
    }
}
