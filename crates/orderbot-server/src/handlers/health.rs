use axum::Json;

/// GET / — placeholder text the platform sees when probing the endpoint.
pub async fn default_text() -> Json<&'static str> {
    Json("Default Text")
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
