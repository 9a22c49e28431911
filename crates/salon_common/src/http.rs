// --- File: crates/salon_common/src/http.rs ---
use axum::{
    http::Uri,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{not_found, HttpStatusCode, SalonError};

pub mod client;

/// JSON envelope `{"error": {"message", "code"}}` with the matching status.
impl IntoResponse for SalonError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": {
                "message": self.to_string(),
                "code": status.as_u16(),
            }
        }));
        (status, body).into_response()
    }
}

/// Fallback for unmatched routes.
pub async fn not_found_handler(uri: Uri) -> SalonError {
    not_found(format!("no route for {}", uri.path()))
}
