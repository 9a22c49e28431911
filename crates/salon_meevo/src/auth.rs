// --- File: crates/salon_meevo/src/auth.rs ---
//! OAuth2 client-credentials token handling for the Meevo public API.
//!
//! [`TokenCache`] keeps a single bearer token and refreshes it through a
//! [`TokenExchange`] once less than the safety margin of its lifetime is left.
//! The cache lock is held across the exchange, so concurrent callers that find
//! the token stale wait for the one refresh in flight instead of issuing their own.

use async_trait::async_trait;
use reqwest::Client;
use salon_config::MeevoConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{upstream_error_message, MeevoError};

/// Upper bound on how long a token is trusted, whatever `expires_in` says.
pub const MAX_TOKEN_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// A freshly issued token and how long the issuer says it lives.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessToken {
    pub token: String,
    pub lifetime: Duration,
}

/// Obtains a new access token from the authorization server.
#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self) -> Result<AccessToken, MeevoError>;
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64, // seconds
}

/// Client-credentials exchange against the configured `auth_url`.
pub struct ClientCredentialsExchange {
    http: Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
}

impl ClientCredentialsExchange {
    pub fn new(http: Client, config: &MeevoConfig) -> Self {
        Self {
            http,
            auth_url: config.auth_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        }
    }
}

#[async_trait]
impl TokenExchange for ClientCredentialsExchange {
    async fn exchange(&self) -> Result<AccessToken, MeevoError> {
        let response = self
            .http
            .post(&self.auth_url)
            .json(&TokenRequest {
                client_id: &self.client_id,
                client_secret: &self.client_secret,
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MeevoError::Auth(format!("Token request timed out: {}", e))
                } else {
                    MeevoError::Auth(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MeevoError::Auth(e.to_string()))?;

        if !status.is_success() {
            warn!("Meevo token request rejected with status {}", status);
            let message = upstream_error_message(&body).unwrap_or_else(|| {
                format!("Token request failed with status code {}", status.as_u16())
            });
            return Err(MeevoError::Auth(message));
        }

        let parsed: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| MeevoError::Auth(format!("Malformed token response: {}", e)))?;
        if parsed.access_token.is_empty() {
            return Err(MeevoError::Auth(
                "Malformed token response: empty access_token".to_string(),
            ));
        }

        Ok(AccessToken {
            token: parsed.access_token,
            lifetime: Duration::from_secs(parsed.expires_in),
        })
    }
}

#[derive(Debug)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn usable_at(&self, now: Instant, safety_margin: Duration) -> bool {
        now + safety_margin < self.expires_at
    }
}

/// Process-wide holder of the one bearer token.
pub struct TokenCache {
    exchange: Box<dyn TokenExchange>,
    safety_margin: Duration,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(exchange: Box<dyn TokenExchange>, safety_margin: Duration) -> Self {
        Self {
            exchange,
            safety_margin,
            cached: Mutex::new(None),
        }
    }

    /// Returns a token valid for at least the safety margin, refreshing if needed.
    ///
    /// A failed refresh leaves the cache as it was. A zero lifetime counts as
    /// a failed refresh.
    pub async fn get_token(&self) -> Result<String, MeevoError> {
        let mut cached = self.cached.lock().await;

        if let Some(current) = cached.as_ref() {
            if current.usable_at(Instant::now(), self.safety_margin) {
                debug!("Reusing cached Meevo token");
                return Ok(current.token.clone());
            }
        }

        info!("Getting fresh Meevo OAuth2 token");
        let fresh = self.exchange.exchange().await?;
        if fresh.lifetime.is_zero() {
            return Err(MeevoError::Auth(
                "Malformed token response: expires_in is 0".to_string(),
            ));
        }
        let lifetime = if fresh.lifetime > MAX_TOKEN_LIFETIME {
            warn!(
                "Meevo token lifetime {}s exceeds the {}s cap, treating it as the cap",
                fresh.lifetime.as_secs(),
                MAX_TOKEN_LIFETIME.as_secs()
            );
            MAX_TOKEN_LIFETIME
        } else {
            fresh.lifetime
        };
        if lifetime <= self.safety_margin {
            warn!(
                "Meevo token lifetime {:?} is within the {:?} safety margin, it will not be reused",
                lifetime, self.safety_margin
            );
        }

        let token = fresh.token.clone();
        *cached = Some(CachedToken {
            token: fresh.token,
            expires_at: Instant::now() + lifetime,
        });
        info!("Meevo token obtained, valid for {}s", lifetime.as_secs());

        Ok(token)
    }
}
