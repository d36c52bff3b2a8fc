use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

pub mod error;
pub mod handlers;
pub mod models;
pub mod state;
pub mod template;
pub mod upload;

pub use state::AppState;

/// Build the HTTP surface over the shared state.
pub fn router(state: Arc<AppState>) -> Router {
    // Uploads are whole PDFs; allow up to 50MB.
    let body_limit = axum::extract::DefaultBodyLimit::max(50 * 1024 * 1024);

    Router::new()
        .route("/", get(template::index))
        .route("/upload-pdf", post(handlers::upload::upload_pdf))
        .route("/ask-question", post(handlers::ask::ask_question))
        .route("/summary", get(handlers::summary::summary))
        .layer(body_limit)
        // Any origin may call this service.
        .layer(CorsLayer::permissive())
        .with_state(state)
}
