use axum::http::StatusCode;

use super::ApiSuccess;

pub async fn health() -> ApiSuccess<serde_json::Value> {
    ApiSuccess::new(StatusCode::OK, serde_json::json!({ "status": "ok" }))
}
