use std::fmt;

use async_trait::async_trait;

use crate::types::Sentiment;
use crate::Result;

#[async_trait]
pub trait SentimentModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Score the polarity and subjectivity of a piece of text
    async fn analyze(&self, text: &str) -> Result<Sentiment>;
}
