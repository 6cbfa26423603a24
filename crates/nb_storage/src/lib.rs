use std::path::PathBuf;
use std::sync::Arc;

use nb_core::{BookmarkStorage, Error, Result};
use tracing::info;

pub mod backends;

pub use backends::*;

pub const STORAGE_KINDS: &[&str] = &["memory", "file"];

pub fn default_storage_path() -> PathBuf {
    PathBuf::from("bookmarks.json")
}

/// Open the bookmark store named on the command line.
pub async fn create_storage(kind: &str, path: Option<PathBuf>) -> Result<Arc<dyn BookmarkStorage>> {
    let storage: Arc<dyn BookmarkStorage> = match kind {
        "memory" => Arc::new(MemoryStorage::new()),
        "file" => {
            let path = path.unwrap_or_else(default_storage_path);
            Arc::new(JsonFileStorage::open(path).await?)
        }
        other => {
            return Err(Error::Storage(format!(
                "Unknown storage backend: {} (available: {})",
                other,
                STORAGE_KINDS.join(", ")
            )))
        }
    };
    info!("🏦 Storage backend initialized (using {})", kind);
    Ok(storage)
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::create_storage;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_storage() {
        assert!(create_storage("memory", None).await.is_ok());
        assert!(create_storage("qdrant", None).await.is_err());

        let dir = tempfile::tempdir().unwrap();
        let storage = create_storage("file", Some(dir.path().join("b.json"))).await.unwrap();
        assert!(storage.list().await.unwrap().is_empty());
    }
}
