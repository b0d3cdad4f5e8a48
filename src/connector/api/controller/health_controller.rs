use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::super::Container;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
    pub storage: String,
}

pub struct HealthController<'a> {
    container: &'a Container,
}

impl<'a> HealthController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn health(&self) -> (StatusCode, HealthResponse) {
        let (code, status) = match self.container.ping().await {
            Ok(()) => (StatusCode::OK, "ok"),
            Err(e) => {
                warn!("Health check failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
            }
        };

        (
            code,
            HealthResponse {
                status: status.to_string(),
                model: self.container.model_name().to_string(),
                storage: self.container.storage().to_string(),
            },
        )
    }
}

/// `GET /health`
pub async fn health(State(container): State<Arc<Container>>) -> (StatusCode, Json<HealthResponse>) {
    let (code, body) = HealthController::new(&container).health().await;
    (code, Json(body))
}
