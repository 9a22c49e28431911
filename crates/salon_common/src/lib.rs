// --- File: crates/salon_common/src/lib.rs ---

pub mod error;    // Error handling
pub mod handlers; // Shared HTTP handlers (health)
pub mod http;     // HTTP utilities
pub mod logging;  // Logging utilities
pub mod routes;   // Shared route definitions

pub use routes::routes;

pub use error::{config_error, not_found, Context, HttpStatusCode, SalonError};

pub use handlers::{HealthInfo, HealthResponse};

pub use http::{client::create_client, not_found_handler};

pub use logging::{init, init_with_level};
