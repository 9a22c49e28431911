// --- File: crates/salon_meevo/src/error.rs ---
use serde::Serialize;
use thiserror::Error;

/// Failures of a booking attempt. The message is what the caller sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeevoError {
    /// Missing field or unresolvable service. No upstream call was made.
    #[error("{0}")]
    Validation(String),
    /// The OAuth token exchange failed.
    #[error("{0}")]
    Auth(String),
    /// The booking call was rejected or never completed.
    #[error("{0}")]
    Upstream(String),
}

/// Machine-readable failure category in the booking response.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    Auth,
    Upstream,
}

impl MeevoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MeevoError::Validation(_) => ErrorKind::Validation,
            MeevoError::Auth(_) => ErrorKind::Auth,
            MeevoError::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

/// Pulls a human-readable message out of an upstream error body.
///
/// Checks `error.message`, then a string `error` (with `error_description`
/// preferred when present, as OAuth endpoints send), then a top-level `message`.
pub fn upstream_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;

    let non_empty = |v: Option<&serde_json::Value>| {
        v.and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    non_empty(json.pointer("/error/message"))
        .or_else(|| {
            json.get("error")
                .filter(|e| e.is_string())
                .and_then(|e| non_empty(json.get("error_description")).or_else(|| non_empty(Some(e))))
        })
        .or_else(|| non_empty(json.get("message")))
}
