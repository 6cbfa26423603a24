pub mod file;
pub mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

use chrono::Utc;
use nb_core::{Article, Bookmark, Preferences};
use serde::{Deserialize, Serialize};

/// Everything a backend persists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    #[serde(default)]
    pub bookmarks: Vec<Bookmark>,
    #[serde(default)]
    pub preferences: Preferences,
}

impl StoreState {
    pub fn add(&mut self, article: &Article) -> Bookmark {
        self.bookmarks.retain(|b| b.article.url != article.url);
        let bookmark = Bookmark {
            article: article.clone(),
            saved_at: Utc::now(),
        };
        self.bookmarks.push(bookmark.clone());
        bookmark
    }

    pub fn remove(&mut self, url: &str) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.article.url != url);
        self.bookmarks.len() != before
    }

    pub fn list(&self) -> Vec<Bookmark> {
        let mut bookmarks = self.bookmarks.clone();
        bookmarks.reverse();
        bookmarks.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        bookmarks
    }
}
