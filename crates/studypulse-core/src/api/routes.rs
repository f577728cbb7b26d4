//! API routes

use std::path::Path;

use axum::{middleware, routing::get, Router};
use tower_http::services::{ServeDir, ServeFile};

use super::handlers::{self, AppState};
use super::middleware::require_api_key;

/// Create the API router
///
/// Every `/api` route requires the shared API key. When `static_dir` is
/// given, other paths are served from it with `index.html` as the
/// single-page-app fallback.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/trends", get(handlers::get_trends))
        .route("/comparisons", get(handlers::get_comparisons))
        .route("/filter-options", get(handlers::get_filter_options))
        .fallback(handlers::api_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), require_api_key));

    let router = Router::new()
        // Health
        .route("/health", get(handlers::health))

        // Dashboard data
        .nest("/api", api)

        .with_state(state);

    match static_dir {
        Some(dir) => router.fallback_service(
            ServeDir::new(dir).not_found_service(ServeFile::new(dir.join("index.html"))),
        ),
        None => router,
    }
}
