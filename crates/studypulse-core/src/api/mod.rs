//! REST API implementation
//!
//! This module provides the HTTP API for the StudyPulse dashboard.

pub mod handlers;
pub mod middleware;
pub mod routes;

pub use handlers::{ApiErrorResponse, AppState};
pub use routes::create_router;

use std::path::PathBuf;
use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::data::MetricsSource;
use crate::error::{Error, Result};

/// HTTP API server
pub struct HttpServer {
    state: AppState,
    static_dir: Option<PathBuf>,
    cors_origin: Option<String>,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: &Config, source: Arc<dyn MetricsSource>) -> Self {
        let state = AppState::new(source, config.auth.api_key.as_str())
            .with_ratios(config.analytics.into());

        let static_dir = config.server.static_dir.clone().filter(|dir| {
            let exists = dir.is_dir();
            if !exists {
                warn!(dir = %dir.display(), "Static directory not found, frontend will not be served");
            }
            exists
        });

        Self {
            state,
            static_dir,
            cors_origin: config.server.cors_origin.clone(),
        }
    }

    fn cors(&self) -> Result<CorsLayer> {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

        match &self.cors_origin {
            Some(origin) if origin != "*" => {
                let origin = HeaderValue::from_str(origin)
                    .map_err(|e| Error::config(format!("invalid cors_origin {origin:?}: {e}")))?;
                Ok(cors.allow_origin(origin))
            }
            _ => Ok(cors.allow_origin(Any)),
        }
    }

    /// Start the HTTP server, stopping on Ctrl+C
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = create_router(self.state.clone(), self.static_dir.as_deref())
            .layer(CompressionLayer::new())
            .layer(self.cors()?)
            .layer(TraceLayer::new_for_http());

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Internal(format!("failed to bind {addr}: {e}")))?;

        info!("HTTP server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Ctrl+C received, shutting down...");
                }
            })
            .await
            .map_err(|e| Error::Internal(e.to_string()))?;

        Ok(())
    }
}
