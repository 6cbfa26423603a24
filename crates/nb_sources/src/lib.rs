pub mod config;
pub mod service;
pub mod sources;

pub use config::NewsApiConfig;
pub use service::NewsService;
pub use sources::{create_source, NewsApiSource, ReutersSource};

pub mod prelude {
    pub use super::{NewsApiConfig, NewsService};
    pub use nb_core::{Article, Error, NewsQuery, NewsResponse, NewsSource, Result};
}
