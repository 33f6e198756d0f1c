//! Liveness probe

use axum::http::header;
use axum::response::IntoResponse;

pub const HEALTH_BODY: &str = "200";

/// Handler for `/health`; answers any method with a fixed body
pub async fn health() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/html")], HEALTH_BODY)
}
