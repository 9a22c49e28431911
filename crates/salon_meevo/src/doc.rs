// --- File: crates/salon_meevo/src/doc.rs ---
#![allow(dead_code)]
use utoipa::OpenApi;

use crate::error::ErrorKind;
use crate::handlers::{ServiceListing, ServicesResponse, UsageExample};
use crate::logic::{BookingRequest, BookingResponse};
use salon_common::HealthResponse;

/// Books one appointment at the configured location.
/// Outcomes, failures included, are always reported with HTTP 200.
#[utoipa::path(
    post,
    path = "/book",
    request_body(content = BookingRequest, example = json!({
        "client_id": "5b1e7c2a-9f0e-4f43-8a51-a76001000001",
        "service": "haircut_skin_fade",
        "datetime": "2025-12-19T10:00:00-08:00",
        "additional_services": ["wash", "grooming"]
    })),
    responses(
        (status = 200, description = "Booking outcome; check `success` and `kind`", body = BookingResponse)
    ),
    tag = "Booking"
)]
fn doc_book_handler() {}

#[utoipa::path(
    get,
    path = "/services",
    responses(
        (status = 200, description = "Catalog grouped by category, with accepted names and rules", body = ServicesResponse)
    ),
    tag = "Booking"
)]
fn doc_services_handler() {}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
fn doc_health_handler() {}

/// OpenAPI documentation for the booking API
#[derive(OpenApi)]
#[openapi(
    paths(doc_book_handler, doc_services_handler, doc_health_handler),
    components(schemas(
        BookingRequest,
        BookingResponse,
        ErrorKind,
        ServicesResponse,
        ServiceListing,
        UsageExample,
        HealthResponse
    )),
    tags(
        (name = "Booking", description = "Simplified appointment booking against Meevo"),
        (name = "Health", description = "Liveness information")
    )
)]
pub struct MeevoApiDoc;
