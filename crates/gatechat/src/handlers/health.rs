//! Health probes.

use axum::http::StatusCode;

/// GET /livez, GET /readyz
pub async fn probe() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
