use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::application::ports::{PatchRepository, TextGenerator};
use crate::infrastructure::ConnectionRegistry;

/// Application state shared across REST handlers
pub struct AppState {
    pub patch_repo: Arc<dyn PatchRepository>,
    pub text_generator: Arc<dyn TextGenerator>,
    pub connections: Arc<ConnectionRegistry>,
    /// Upper bound on a single provider call
    pub reflection_timeout: Duration,
}

impl AppState {
    pub fn new(
        patch_repo: Arc<dyn PatchRepository>,
        text_generator: Arc<dyn TextGenerator>,
        connections: Arc<ConnectionRegistry>,
        reflection_timeout: Duration,
    ) -> Self {
        AppState {
            patch_repo,
            text_generator,
            connections,
            reflection_timeout,
        }
    }
}

/// Create the REST API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/patches", get(handlers::list_patches))
        .route("/reflection", post(handlers::reflection))
        // Route names the first web client used
        .route("/get-patches", get(handlers::list_patches))
        .route("/ai-line", post(handlers::reflection))
        .route("/health", get(handlers::health))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
