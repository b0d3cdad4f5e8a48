use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::container::Container;
use super::controller::{chat_controller, health_controller};

pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/v1/chat", post(chat_controller::chat))
        .route("/health", get(health_controller::health))
        // Prompts have no size cap.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(container)
}

/// Serves until Ctrl-C / SIGTERM, then lets in-flight requests finish.
/// The caller owns the container and tears it down afterwards.
pub async fn serve(container: Arc<Container>, addr: SocketAddr) -> Result<()> {
    let app = build_router(container);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Chat API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
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
    info!("Shutdown signal received");
}
