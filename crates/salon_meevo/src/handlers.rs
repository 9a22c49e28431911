// --- File: crates/salon_meevo/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use reqwest::Client;
use salon_common::{create_client, SalonError};
use salon_config::{AppConfig, ServiceCategory};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::auth::{ClientCredentialsExchange, TokenCache};
use crate::catalog::{CatalogEntry, ServiceCatalog, ServiceResolver};
use crate::error::MeevoError;
use crate::logic::{BookingRequest, BookingResponse, BookingService};

/// Shared state for the Meevo routes.
pub struct MeevoState {
    pub booking: BookingService,
    pub catalog: Arc<ServiceCatalog>,
}

impl MeevoState {
    /// Builds the catalog, HTTP client and token cache from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, SalonError> {
        let meevo = &config.meevo;
        let catalog = Arc::new(ServiceCatalog::from_config(config)?);
        let http: Client = create_client(meevo.request_timeout_secs, true)?;

        let tokens = TokenCache::new(
            Box::new(ClientCredentialsExchange::new(http.clone(), meevo)),
            Duration::from_secs(meevo.token_safety_margin_secs),
        );
        let resolver: Arc<dyn ServiceResolver> = catalog.clone();

        info!(
            "Meevo booking ready: {} catalog entries, tenant {}, location {}, {:?} id check",
            catalog.entries().len(),
            meevo.tenant_id,
            meevo.location_id,
            catalog.identifier_check()
        );

        Ok(Self {
            booking: BookingService::new(http, meevo, tokens, resolver),
            catalog,
        })
    }
}

/// Handler for `POST /book`.
///
/// Every outcome, malformed bodies included, is reported with HTTP 200 and
/// `success` set accordingly.
#[axum::debug_handler]
pub async fn book_handler(
    State(state): State<Arc<MeevoState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Json<BookingResponse> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("Unreadable booking request: {}", rejection.body_text());
            return Json(BookingResponse::failure(&MeevoError::Validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            ))));
        }
    };

    info!(
        "Booking request received: service={:?} datetime={:?} add-ons={:?}",
        request.service, request.datetime, request.additional_services
    );
    Json(state.booking.book(request).await)
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServiceListing {
    pub service_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub aliases: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UsageExample {
    pub service: String,
    pub additional_services: Vec<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ServicesResponse {
    pub primary: BTreeMap<String, ServiceListing>,
    pub addons: BTreeMap<String, ServiceListing>,
    pub legacy: BTreeMap<String, ServiceListing>,
    /// Every accepted name, normalized, with the id it books.
    pub aliases: BTreeMap<String, String>,
    pub usage_examples: BTreeMap<String, UsageExample>,
    pub booking_rules: Vec<String>,
}

fn listing(entry: &CatalogEntry) -> ServiceListing {
    ServiceListing {
        service_id: entry.service_id.clone(),
        price: entry.price.clone(),
        note: entry.note.clone(),
        aliases: entry.aliases.clone(),
    }
}

/// Operator view of the catalog.
pub fn describe_catalog(catalog: &ServiceCatalog) -> ServicesResponse {
    let group = |category: ServiceCategory| -> BTreeMap<String, ServiceListing> {
        catalog
            .entries_in(category)
            .map(|e| (e.key.clone(), listing(e)))
            .collect()
    };
    let primary_keys: Vec<String> = catalog
        .entries_in(ServiceCategory::Primary)
        .map(|e| e.key.clone())
        .collect();
    let addon_keys: Vec<String> = catalog
        .entries_in(ServiceCategory::Addon)
        .map(|e| e.key.clone())
        .collect();

    // First primary alone, every other primary with all add-ons
    let mut usage_examples = BTreeMap::new();
    for (i, primary) in primary_keys.iter().enumerate() {
        if i == 0 || addon_keys.is_empty() {
            usage_examples.insert(
                format!("{}_only", primary),
                UsageExample {
                    service: primary.clone(),
                    additional_services: vec![],
                },
            );
        } else {
            usage_examples.insert(
                format!("{}_with_{}", primary, addon_keys.join("_and_")),
                UsageExample {
                    service: primary.clone(),
                    additional_services: addon_keys.clone(),
                },
            );
        }
    }

    let mut booking_rules = vec![format!(
        "Choose ONE primary service ({})",
        primary_keys.join(", ")
    )];
    if !addon_keys.is_empty() {
        booking_rules.push(format!(
            "{} are optional add-ons for any primary service",
            addon_keys.join(", ")
        ));
        booking_rules.push(
            "Add-ons cannot be booked alone - they require a primary service".to_string(),
        );
    }
    booking_rules
        .push("Add-ons that cannot be resolved are skipped; the booking still goes ahead".to_string());

    ServicesResponse {
        primary: group(ServiceCategory::Primary),
        addons: group(ServiceCategory::Addon),
        legacy: group(ServiceCategory::Legacy),
        aliases: catalog.alias_table(),
        usage_examples,
        booking_rules,
    }
}

/// Handler for `GET /services`.
pub async fn services_handler(State(state): State<Arc<MeevoState>>) -> Json<ServicesResponse> {
    Json(describe_catalog(&state.catalog))
}
