// --- File: crates/salon_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16, // PORT env var wins over the file value
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

// --- Meevo Config ---
// Holds the upstream endpoints and tenant scoping. The client secret is usually
// the "secret_from_env" marker and resolved from MEEVO_CLIENT_SECRET.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MeevoConfig {
    pub auth_url: String, // OAuth2 token endpoint
    pub api_url: String,  // Public API base, e.g. https://host/publicapi/v1
    pub client_id: String,
    pub client_secret: String,
    pub tenant_id: String,
    pub location_id: String,
    /// Upper bound for the token exchange and the booking call, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Minimum remaining lifetime before a cached token is reused, in seconds.
    #[serde(default = "default_token_safety_margin_secs")]
    pub token_safety_margin_secs: u64,
    /// Accept only real UUIDs as canonical service ids instead of the
    /// "contains a dash and is long" shape check.
    #[serde(default)]
    pub strict_service_ids: bool,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_token_safety_margin_secs() -> u64 {
    300
}

// --- Service Catalog Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Primary,
    Addon,
    Legacy,
}

/// One bookable service and every name a caller may use for it.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CatalogEntryConfig {
    /// Key shown in the catalog listing, e.g. "haircut_standard".
    pub key: String,
    /// Canonical upstream service id.
    pub service_id: String,
    pub category: ServiceCategory,
    /// Additional names accepted for this service. The key is always accepted.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub price: Option<String>,
    pub note: Option<String>,
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,
    pub meevo: MeevoConfig,

    // Falls back to the built-in development catalog when absent
    #[serde(default)]
    pub catalog: Option<Vec<CatalogEntryConfig>>,
}
