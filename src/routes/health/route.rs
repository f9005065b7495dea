use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

pub fn create_route() -> Router {
    Router::new().route("/health", get(health))
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "Health"
)]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
