use crate::AppState;
use axum::{Router, routing::get};

/// Public Router Module
///
/// Endpoints reachable without a credential. Nothing here touches entity data.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Liveness probe for load balancers and monitoring.
        .route("/health", get(|| async { "ok" }))
}
