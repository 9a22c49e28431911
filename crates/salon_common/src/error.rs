// --- File: crates/salon_common/src/error.rs ---
use axum::http::StatusCode;
use std::fmt;
use thiserror::Error;

/// Errors raised outside the booking flow: startup, routing and the HTTP
/// client. Booking failures travel as `salon_meevo::MeevoError` instead and
/// never become an error status.
#[derive(Error, Debug)]
pub enum SalonError {
    /// Missing or inconsistent configuration, including the service catalog
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Not found: {0}")]
    NotFoundError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Maps an error onto the status code of its JSON response.
pub trait HttpStatusCode {
    fn status_code(&self) -> StatusCode;
}

impl HttpStatusCode for SalonError {
    fn status_code(&self) -> StatusCode {
        match self {
            SalonError::NotFoundError(_) => StatusCode::NOT_FOUND,
            SalonError::ConfigError(_) | SalonError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Attaches a description of the failed step to any error, as an
/// `InternalError`.
pub trait Context<T> {
    fn context<C>(self, context: C) -> Result<T, SalonError>
    where
        C: fmt::Display;

    /// Lazy variant of [`Context::context`].
    fn with_context<C, F>(self, f: F) -> Result<T, SalonError>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E: fmt::Display> Context<T> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SalonError>
    where
        C: fmt::Display,
    {
        self.map_err(|error| SalonError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SalonError>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|error| SalonError::InternalError(format!("{}: {}", f(), error)))
    }
}

// The HTTP client is only built at startup; a failure there is fatal.
impl From<reqwest::Error> for SalonError {
    fn from(err: reqwest::Error) -> Self {
        SalonError::InternalError(format!("HTTP client: {}", err))
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> SalonError {
    SalonError::ConfigError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SalonError {
    SalonError::NotFoundError(message.to_string())
}
