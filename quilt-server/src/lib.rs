//! Quilt Server
//!
//! A realtime collaborative quilt board. Clients sew colored patches with a
//! message and an optional AI reflection; every connected client sees new
//! patches live, and the full quilt is replayed from storage on load.
//!
//! # Architecture
//!
//! - **Domain**: `Patch`, `NewPatch`, `QuiltEvent`, the `Clock` trait
//! - **Application**: ports (`PatchRepository`, `EventPublisher`, `TextGenerator`)
//!   and use cases (`SewPatchUseCase`, `ListPatchesUseCase`, `ReflectUseCase`)
//! - **Infrastructure**: SQLite/in-memory stores, broadcast publisher,
//!   connection registry, Cohere client, configuration
//! - **Presentation**: REST API and WebSocket handlers
//!
//! # Endpoints
//!
//! - `GET /patches`: full history, oldest first
//! - `POST /reflection`: `{text}` to `{line}`
//! - `GET /ws`: realtime channel (`new_patch` in, `update_quilt` out)
//! - `GET /health`
//!
//! # Example
//!
//! ```ignore
//! use quilt_server::{QuiltConfig, QuiltServer};
//!
//! #[tokio::main]
//! async fn main() {
//!     let server = QuiltServer::from_config(QuiltConfig::default()).unwrap();
//!     server.run().await.unwrap();
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

// Re-export commonly used types
pub use domain::{Clock, NewPatch, Patch, PatchId, QuiltEvent, Timestamp};

pub use infrastructure::{
    BroadcastEventPublisher, CohereTextGenerator, ConnectionRegistry, DisabledTextGenerator,
    FixedClock, InMemoryPatchRepository, QuiltConfig, SqlitePatchRepository, SystemClock,
};

pub use application::{
    EventPublisher, GenerationError, PatchRepository, ReflectUseCase, SewPatchUseCase,
    StoreError, TextGenerator,
};

pub use presentation::{AppState, WsState, create_router, ws_handler};

use axum::{Router, routing::get};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The quilt server: store, provider, hub and HTTP surface wired together
pub struct QuiltServer {
    pub config: QuiltConfig,
    pub patch_repo: Arc<dyn PatchRepository>,
    pub text_generator: Arc<dyn TextGenerator>,
    pub event_publisher: Arc<BroadcastEventPublisher>,
    pub connections: Arc<ConnectionRegistry>,
}

impl QuiltServer {
    /// Build the server from explicit components
    pub fn with_components(
        config: QuiltConfig,
        patch_repo: Arc<dyn PatchRepository>,
        text_generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let event_publisher = Arc::new(BroadcastEventPublisher::new(config.event_capacity));

        QuiltServer {
            config,
            patch_repo,
            text_generator,
            event_publisher,
            connections: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Build the server from configuration
    ///
    /// A missing or unusable provider credential only degrades reflections;
    /// it never stops the server from starting.
    pub fn from_config(config: QuiltConfig) -> Result<Self, ServerError> {
        let patch_repo: Arc<dyn PatchRepository> = if config.storage.in_memory {
            tracing::warn!("Using in-memory patch storage; patches will not survive a restart");
            Arc::new(InMemoryPatchRepository::new())
        } else {
            tracing::info!("Opening patch database at {}", config.storage.database_path);
            Arc::new(SqlitePatchRepository::open(&config.storage.database_path)?)
        };

        let text_generator = build_text_generator(&config);

        Ok(Self::with_components(config, patch_repo, text_generator))
    }

    /// Create the REST API state
    pub fn app_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(
            Arc::clone(&self.patch_repo),
            Arc::clone(&self.text_generator),
            Arc::clone(&self.connections),
            self.config.reflection.timeout(),
        ))
    }

    /// Create WebSocket state
    pub fn ws_state(&self) -> Arc<WsState> {
        Arc::new(WsState::new(
            Arc::clone(&self.patch_repo),
            Arc::clone(&self.event_publisher),
            Arc::clone(&self.connections),
        ))
    }

    /// Combined router with REST and WebSocket
    pub fn router(&self) -> Router {
        Router::new()
            .route("/ws", get(ws_handler))
            .with_state(self.ws_state())
            .merge(create_router(self.app_state()))
    }

    /// Run the quilt server until Ctrl-C
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self.config.bind_addr();
        let router = self.router();

        match self.patch_repo.count().await {
            Ok(n) => tracing::info!("Quilt has {} patches", n),
            Err(e) => tracing::error!(error = %e, "Could not count stored patches"),
        }

        tracing::info!("Quilt server listening on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Quilt server stopped");
        Ok(())
    }
}

fn build_text_generator(config: &QuiltConfig) -> Arc<dyn TextGenerator> {
    let Some(api_key) = config.reflection.usable_api_key() else {
        tracing::warn!(
            "COHERE_API_KEY is not configured; AI reflections will use the fallback line"
        );
        return Arc::new(DisabledTextGenerator);
    };

    match CohereTextGenerator::new(api_key, &config.reflection) {
        Ok(generator) => {
            tracing::info!("AI reflections via Cohere model {}", generator.model());
            Arc::new(generator)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not build Cohere client; AI reflections disabled");
            Arc::new(DisabledTextGenerator)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_disables_generator() {
        let config = QuiltConfig::default();
        let generator = build_text_generator(&config);
        assert_eq!(generator.name(), "disabled");
    }

    #[test]
    fn test_usable_key_selects_cohere() {
        let mut config = QuiltConfig::default();
        config.reflection.api_key = Some("real-looking-key".to_string());
        let generator = build_text_generator(&config);
        assert_eq!(generator.name(), "cohere");
    }

    #[tokio::test]
    async fn test_in_memory_storage_from_config() {
        let mut config = QuiltConfig::default();
        config.storage.in_memory = true;

        let server = QuiltServer::from_config(config).unwrap();
        assert_eq!(server.patch_repo.count().await.unwrap(), 0);
        assert!(server.connections.is_empty());
    }
}
