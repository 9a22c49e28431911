// --- File: crates/salon_meevo/src/routes.rs ---
use axum::{
    routing::{get, post},
    Router,
};
use salon_common::SalonError;
use salon_config::AppConfig;
use std::sync::Arc;

use crate::handlers::{book_handler, services_handler, MeevoState};

/// Booking routes built from configuration.
pub fn routes(config: Arc<AppConfig>) -> Result<Router, SalonError> {
    let state = Arc::new(MeevoState::from_config(&config)?);
    Ok(router(state))
}

/// Booking routes over an already constructed state.
pub fn router(state: Arc<MeevoState>) -> Router {
    Router::new()
        .route("/book", post(book_handler))
        .route("/services", get(services_handler))
        .with_state(state)
}
