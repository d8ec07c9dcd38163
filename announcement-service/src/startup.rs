//! Router construction and server lifecycle.

use crate::config::{AnnouncementConfig, StoreBackend};
use crate::handlers::{
    create_announcement, delete_announcement, get_announcement, health_check, list_announcements,
    metrics_endpoint, not_found, readiness_check, update_announcement, ANNOUNCEMENTS_PATH,
};
use crate::services::{AnnouncementStore, InMemoryAnnouncementStore, MongoAnnouncementStore};
use axum::{middleware::from_fn, routing::get, Router};
use service_core::error::AppError;
use service_core::middleware::{cors_middleware, make_request_span, metrics_middleware};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state. The store is injected, never global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnnouncementStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AnnouncementStore>) -> Self {
        Self { store }
    }
}

/// Builds the full HTTP surface.
///
/// `/api/announcements/` and `/api/announcements/*rest` share the by-id
/// handlers so that an empty or multi-segment id reaches the id parser and is
/// answered with 400 rather than falling through to 404.
pub fn build_router(state: AppState) -> Router {
    let by_id = get(get_announcement)
        .put(update_announcement)
        .delete(delete_announcement);

    Router::new()
        .route(
            ANNOUNCEMENTS_PATH,
            get(list_announcements).post(create_announcement),
        )
        .route("/api/announcements/", by_id.clone())
        .route("/api/announcements/*rest", by_id)
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .fallback(not_found)
        .with_state(state)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        // Outermost so preflights skip everything else.
        .layer(from_fn(cors_middleware))
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Connects the configured store and binds the listener.
    ///
    /// Both failures are fatal to the caller; nothing is served half-started.
    pub async fn build(config: AnnouncementConfig) -> Result<Self, AppError> {
        let store: Arc<dyn AnnouncementStore> = match config.store.backend {
            StoreBackend::MongoDb => {
                let mongo = &config.store.mongodb;
                let store =
                    MongoAnnouncementStore::connect(&mongo.uri, &mongo.database, &mongo.collection)
                        .await?;
                store.health_check().await.map_err(|e| {
                    tracing::error!("Failed to reach MongoDB: {}", e);
                    AppError::from(e)
                })?;
                tracing::info!("Successfully connected to MongoDB");
                Arc::new(store)
            }
            StoreBackend::Memory => {
                tracing::warn!("Using in-memory announcement store; data is not persisted");
                Arc::new(InMemoryAnnouncementStore::new())
            }
        };

        Self::build_with_store(config, store).await
    }

    /// Binds the listener around an already constructed store.
    pub async fn build_with_store(
        config: AnnouncementConfig,
        store: Arc<dyn AnnouncementStore>,
    ) -> Result<Self, AppError> {
        // Port 0 picks a random port (used by tests).
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Announcement service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state: AppState::new(store),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> Arc<dyn AnnouncementStore> {
        self.state.store.clone()
    }

    /// Serves until SIGINT/SIGTERM.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
