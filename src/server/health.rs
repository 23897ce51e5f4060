//! Health check endpoint for liveness probes.
//!
//! Returns 200 OK if the server is running, for load balancers and the
//! hosting platform's health checks.

use axum::http::StatusCode;

/// Health check handler.
pub async fn health_handler() -> (StatusCode, &'static str) {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_returns_200_ok() {
        let (status, body) = health_handler().await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");
    }
}
