use axum::Json;
use serde_json::{json, Value};

/// GET /health
/// Static liveness payload for external orchestration.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "coding-stats-api"
    }))
}
