use async_trait::async_trait;

use crate::types::{Headlines, NewsQuery};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetch one page of raw headlines matching the query
    async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Headlines>;
}
