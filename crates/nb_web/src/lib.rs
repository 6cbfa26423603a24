use axum::{
    routing::{get, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/api/news", get(handlers::get_news))
        .route("/api/news/bubbles", get(handlers::get_bubbles))
        .route("/api/categories", get(handlers::get_categories))
        .route("/api/health", get(handlers::health_check))
        .route(
            "/api/bookmarks",
            get(handlers::list_bookmarks)
                .post(handlers::create_bookmark)
                .delete(handlers::delete_bookmark),
        )
        .route("/api/preferences", put(handlers::put_preferences).get(handlers::get_preferences))
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Bind `addr` and serve until the process is interrupted.
pub async fn serve(state: AppState, addr: SocketAddr) -> nb_core::Result<()> {
    let app = create_app(state).await;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🌐 Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}

pub mod prelude {
    pub use crate::AppState;
    pub use nb_core::{Article, Error, Result};
}
