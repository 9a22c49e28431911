// --- File: crates/salon_common/src/routes.rs ---

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::handlers::{health_handler, HealthInfo};

/// Creates a router with the routes shared by every deployment.
pub fn routes(info: HealthInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(Arc::new(info))
}
