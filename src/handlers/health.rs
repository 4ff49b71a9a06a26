use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::{AppState, Storage};
use crate::database::DatabaseManager;

/// GET /health - liveness plus a storage ping
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Storage::Postgres(pool) = &state.storage else {
        return (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "storage": "memory" })),
        );
    };

    match DatabaseManager::health_check(pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "status": "ok", "timestamp": now, "storage": "postgres" })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "degraded", "timestamp": now, "storage": "postgres" })),
            )
        }
    }
}
