// --- File: crates/salon_meevo/src/lib.rs ---
//! Meevo booking integration: resolves friendly service names, keeps the
//! OAuth token warm and translates simplified booking requests into Meevo
//! calls.

pub mod auth;
pub mod catalog;
#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;

#[cfg(test)]
mod auth_test;
#[cfg(test)]
mod catalog_proptest;

/// Capabilities advertised on `/health`.
pub const FEATURES: &[&str] = &[
    "single_service",
    "additional_services",
    "service_name_resolution",
];

pub use catalog::{IdentifierCheck, ServiceCatalog, ServiceResolver};
pub use error::{ErrorKind, MeevoError};
pub use handlers::MeevoState;
pub use logic::{BookingRequest, BookingResponse, BookingService};
pub use routes::{router, routes};
