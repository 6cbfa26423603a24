use std::sync::Arc;

use nb_core::BookmarkStorage;
use nb_layout::LayoutConfig;
use nb_sources::NewsService;

/// Ticks a bubble request may spend settling before it is rendered anyway.
pub const DEFAULT_LAYOUT_TICKS: usize = 300;

pub struct AppState {
    pub news: Arc<NewsService>,
    pub storage: Arc<dyn BookmarkStorage>,
    pub layout: LayoutConfig,
    pub layout_ticks: usize,
}

impl AppState {
    pub fn new(news: Arc<NewsService>, storage: Arc<dyn BookmarkStorage>) -> Self {
        Self {
            news,
            storage,
            layout: LayoutConfig::default(),
            layout_ticks: DEFAULT_LAYOUT_TICKS,
        }
    }
}
