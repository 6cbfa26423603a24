use std::sync::Arc;

use nb_core::{Error, NewsSource, Result};

use crate::config::NewsApiConfig;

pub mod newsapi;
pub mod reuters;

pub use newsapi::NewsApiSource;
pub use reuters::ReutersSource;

pub const SOURCE_NAMES: &[&str] = &["newsapi", "reuters"];

/// Build a source by its CLI name.
pub fn create_source(name: &str, config: NewsApiConfig) -> Result<Arc<dyn NewsSource>> {
    match name.to_lowercase().as_str() {
        "newsapi" => Ok(Arc::new(NewsApiSource::new(config)?)),
        "reuters" => Ok(Arc::new(ReutersSource::new())),
        other => Err(Error::InvalidQuery(format!(
            "Unknown news source: {} (available: {})",
            other,
            SOURCE_NAMES.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_source() {
        assert_eq!(create_source("NewsAPI", NewsApiConfig::default()).unwrap().name(), "NewsAPI");
        assert_eq!(create_source("reuters", NewsApiConfig::default()).unwrap().name(), "Reuters");
        assert!(create_source("bbc", NewsApiConfig::default()).is_err());
    }
}
