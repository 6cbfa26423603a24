use std::path::{Path, PathBuf};

use async_trait::async_trait;
use nb_core::{Article, Bookmark, BookmarkStorage, Preferences, Result};
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::StoreState;

/// Bookmarks and preferences in one JSON document, rewritten on every change.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    state: Mutex<StoreState>,
}

impl JsonFileStorage {
    /// Load `path`, or start empty when it does not exist yet.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let state = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No bookmark file at {}, starting empty", path.display());
                StoreState::default()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, state: &StoreState) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec_pretty(state)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        debug!("Saved {} bookmarks to {}", state.bookmarks.len(), self.path.display());
        Ok(())
    }

    /// Apply `change` to a copy of the state and keep it only once it is on
    /// disk. `change` returns its result and whether anything changed.
    async fn update<T>(&self, change: impl FnOnce(&mut StoreState) -> (T, bool)) -> Result<T> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let (out, changed) = change(&mut next);
        if changed {
            self.persist(&next).await?;
            *state = next;
        }
        Ok(out)
    }
}

#[async_trait]
impl BookmarkStorage for JsonFileStorage {
    async fn add(&self, article: &Article) -> Result<Bookmark> {
        self.update(|state| (state.add(article), true)).await
    }

    async fn remove(&self, url: &str) -> Result<bool> {
        self.update(|state| {
            let removed = state.remove(url);
            (removed, removed)
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Bookmark>> {
        Ok(self.state.lock().await.list())
    }

    async fn preferences(&self) -> Result<Preferences> {
        Ok(self.state.lock().await.preferences)
    }

    async fn set_preferences(&self, preferences: Preferences) -> Result<()> {
        self.update(|state| {
            state.preferences = preferences;
            ((), true)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nb_core::ViewMode;

    #[tokio::test]
    async fn test_file_storage_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("bookmarks.json");

        let storage = JsonFileStorage::open(&path).await.unwrap();
        storage.add(&Article::new("Kept", "https://e.com/kept", "Wire")).await.unwrap();
        storage.add(&Article::new("Dropped", "https://e.com/dropped", "Wire")).await.unwrap();
        storage.remove("https://e.com/dropped").await.unwrap();
        storage
            .set_preferences(Preferences { dark_mode: true, view_mode: ViewMode::List })
            .await
            .unwrap();
        drop(storage);

        let reopened = JsonFileStorage::open(&path).await.unwrap();
        let bookmarks = reopened.list().await.unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].article.title, "Kept");
        assert!(reopened.preferences().await.unwrap().dark_mode);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        let storage = JsonFileStorage::open(&path).await.unwrap();
        storage.add(&Article::new("First", "https://e.com/first", "Wire")).await.unwrap();

        // A directory where the temp file should go makes every write fail.
        let blocker = path.with_extension("json.tmp");
        tokio::fs::create_dir(&blocker).await.unwrap();

        assert!(storage.add(&Article::new("Second", "https://e.com/second", "Wire")).await.is_err());
        assert!(storage.remove("https://e.com/first").await.is_err());
        assert!(storage
            .set_preferences(Preferences { dark_mode: true, view_mode: ViewMode::Compact })
            .await
            .is_err());

        let bookmarks = storage.list().await.unwrap();
        assert_eq!(bookmarks.len(), 1);
        assert_eq!(bookmarks[0].article.url, "https://e.com/first");
        assert_eq!(storage.preferences().await.unwrap(), Preferences::default());

        tokio::fs::remove_dir(&blocker).await.unwrap();
        storage.add(&Article::new("Second", "https://e.com/second", "Wire")).await.unwrap();
        assert_eq!(JsonFileStorage::open(&path).await.unwrap().list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bookmarks.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        assert!(matches!(JsonFileStorage::open(&path).await, Err(nb_core::Error::Serialization(_))));
    }
}
