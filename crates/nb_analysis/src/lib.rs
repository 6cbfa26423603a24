pub mod annotator;
pub mod bias;
pub mod keywords;
pub mod readability;
pub mod sentiment;
pub mod summary;
pub mod tokenize;

pub use annotator::{Analysis, Annotator};
pub use keywords::{extract_keywords, trending_topics};
pub use sentiment::LexiconSentiment;

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub mod prelude {
    pub use super::{Annotator, LexiconSentiment};
    pub use nb_core::{Article, Error, Result, SentimentModel};
}
