use crate::AppState;
use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;
use tracing::warn;

/// GET /health
/// Response: 200 OK with JSON, 503 when the store can't be reached
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let (status, label) = match state.posts.store().health_check().await {
        Ok(()) => (StatusCode::OK, "healthy"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
        }
    };

    (
        status,
        Json(serde_json::json!({
          "status": label,
          "timestamp": Utc::now().timestamp()
        })),
    )
}
