// --- File: crates/salon_meevo/src/logic.rs ---

use chrono::DateTime;
use reqwest::Client;
use salon_config::MeevoConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::auth::TokenCache;
use crate::catalog::ServiceResolver;
use crate::error::{upstream_error_message, ErrorKind, MeevoError};

/// Gender classification the booking endpoint requires on every request.
pub const CLIENT_GENDER: &str = "2035";

pub const BOOKED_MESSAGE: &str = "Appointment booked successfully";
pub const BOOKED_WITH_ADDONS_MESSAGE: &str = "Appointment booked successfully with add-on services";

// --- Data Structures ---

/// Simplified booking request accepted on `POST /book`.
#[derive(Deserialize, Debug, Clone, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "5b1e7c2a-9f0e-4f43-8a51-a76001000001"))]
    pub client_id: Option<String>,
    /// Service alias such as "haircut_skin_fade", or a canonical service id.
    #[cfg_attr(feature = "openapi", schema(example = "haircut_skin_fade"))]
    pub service: Option<String>,
    /// Appointment start, RFC 3339 with offset.
    #[cfg_attr(feature = "openapi", schema(example = "2025-12-19T10:00:00-08:00"))]
    pub datetime: Option<String>,
    /// Employee id of the stylist.
    pub stylist: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = json!(["wash", "grooming"])))]
    pub additional_services: Option<Vec<String>>,
}

/// Normalized booking outcome. Always returned with HTTP 200.
#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BookingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    /// Add-ons exactly as requested, including any that were dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_services: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ErrorKind>,
}

impl BookingResponse {
    pub fn failure(err: &MeevoError) -> Self {
        Self {
            success: false,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
            ..Default::default()
        }
    }
}

/// A request that passed validation, with every reference resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBooking {
    pub client_id: String,
    pub service_id: String,
    pub start_time: String,
    pub stylist: Option<String>,
    pub additional_service_ids: Vec<String>,
    /// Echo of the caller's add-on list
    pub requested_addons: Vec<String>,
}

// --- Core Logic Functions ---

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Checks required fields and resolves service references.
///
/// Unresolvable add-ons are dropped rather than failing the request. The
/// datetime is forwarded untouched.
pub fn validate_request(
    request: &BookingRequest,
    resolver: &dyn ServiceResolver,
) -> Result<ValidatedBooking, MeevoError> {
    let (Some(client_id), Some(service), Some(datetime)) = (
        present(&request.client_id),
        present(&request.service),
        present(&request.datetime),
    ) else {
        return Err(MeevoError::Validation(
            "Missing required fields: client_id, service, and datetime are required".to_string(),
        ));
    };

    let raw_service = request.service.as_deref().unwrap_or(service);
    let service_id = resolver.resolve(raw_service).ok_or_else(|| {
        MeevoError::Validation(format!(
            "Invalid service: \"{}\". Use a valid service UUID or name like \"mens_haircut\", \"wash\", etc.",
            raw_service
        ))
    })?;

    // Meevo has the final say on the start time; only note odd shapes
    if DateTime::parse_from_rfc3339(datetime).is_err() {
        warn!(
            "datetime '{}' is not RFC 3339 with an offset, forwarding as given",
            datetime
        );
    }

    let requested_addons = request.additional_services.clone().unwrap_or_default();
    let additional_service_ids = requested_addons
        .iter()
        .filter_map(|addon| {
            let resolved = resolver.resolve(addon);
            if resolved.is_none() {
                warn!("Dropping unresolvable add-on service '{}'", addon);
            }
            resolved
        })
        .collect();

    Ok(ValidatedBooking {
        client_id: client_id.to_string(),
        service_id,
        start_time: request.datetime.as_deref().unwrap_or(datetime).to_string(),
        stylist: present(&request.stylist).map(str::to_string),
        additional_service_ids,
        requested_addons,
    })
}

/// Form fields for the upstream booking call, in wire order.
pub fn build_payload(booking: &ValidatedBooking) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("ServiceId", booking.service_id.clone()),
        ("StartTime", booking.start_time.clone()),
        ("ClientId", booking.client_id.clone()),
        ("ClientGender", CLIENT_GENDER.to_string()),
    ];
    if let Some(stylist) = &booking.stylist {
        fields.push(("EmployeeId", stylist.clone()));
    }
    if !booking.additional_service_ids.is_empty() {
        // Meevo takes multiple add-ons as one comma-separated field
        fields.push(("AdditionalServiceIds", booking.additional_service_ids.join(",")));
    }
    fields
}

/// Appointment id from `data.appointmentId`, falling back to top-level `appointmentId`.
pub fn extract_appointment_id(body: &Value) -> Option<String> {
    fn as_id(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            // 0 counts as missing, like an empty string
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            _ => None,
        }
    }

    as_id(body.pointer("/data/appointmentId")).or_else(|| as_id(body.get("appointmentId")))
}

/// Translates simplified booking requests into authenticated Meevo calls.
pub struct BookingService {
    http: Client,
    book_url: String,
    tenant_id: String,
    location_id: String,
    tokens: TokenCache,
    resolver: Arc<dyn ServiceResolver>,
}

impl BookingService {
    pub fn new(
        http: Client,
        config: &MeevoConfig,
        tokens: TokenCache,
        resolver: Arc<dyn ServiceResolver>,
    ) -> Self {
        Self {
            http,
            book_url: format!("{}/book/service", config.api_url.trim_end_matches('/')),
            tenant_id: config.tenant_id.clone(),
            location_id: config.location_id.clone(),
            tokens,
            resolver,
        }
    }

    /// Books the appointment, reporting every failure in the response body.
    pub async fn book(&self, request: BookingRequest) -> BookingResponse {
        match self.try_book(&request).await {
            Ok(response) => response,
            Err(err) => {
                match &err {
                    MeevoError::Validation(message) => warn!("Booking rejected: {}", message),
                    other => error!("Booking error: {}", other),
                }
                BookingResponse::failure(&err)
            }
        }
    }

    async fn try_book(&self, request: &BookingRequest) -> Result<BookingResponse, MeevoError> {
        let booking = validate_request(request, self.resolver.as_ref())?;
        let token = self.tokens.get_token().await?;

        let fields = build_payload(&booking);
        let body = serde_urlencoded::to_string(&fields)
            .map_err(|e| MeevoError::Upstream(format!("Failed to encode booking payload: {}", e)))?;
        if !booking.additional_service_ids.is_empty() {
            info!("Adding services: {:?}", booking.additional_service_ids);
        }
        info!("Booking payload: {}", body);

        let response = self
            .http
            .post(&self.book_url)
            .query(&[
                ("TenantId", self.tenant_id.as_str()),
                ("LocationId", self.location_id.as_str()),
            ])
            .bearer_auth(&token)
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/x-www-form-urlencoded",
            )
            .body(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    MeevoError::Upstream(format!("Booking request timed out: {}", e))
                } else {
                    MeevoError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        let body_text = response
            .text()
            .await
            .map_err(|e| MeevoError::Upstream(e.to_string()))?;

        if !status.is_success() {
            error!("Meevo booking failed with status {}: {}", status, body_text);
            let message = upstream_error_message(&body_text).unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            });
            return Err(MeevoError::Upstream(message));
        }

        let json: Value = serde_json::from_str(&body_text).unwrap_or_else(|e| {
            warn!("Meevo booking response is not JSON ({}): {}", e, body_text);
            Value::Null
        });
        let appointment_id = extract_appointment_id(&json);
        match &appointment_id {
            Some(id) => info!("Booking successful! Appointment ID: {}", id),
            None => warn!("Booking accepted but no appointment id in response: {}", body_text),
        }

        let message = if booking.requested_addons.is_empty() {
            BOOKED_MESSAGE
        } else {
            BOOKED_WITH_ADDONS_MESSAGE
        };

        Ok(BookingResponse {
            success: true,
            appointment_id,
            service_id: Some(booking.service_id),
            additional_services: Some(booking.requested_addons),
            message: Some(message.to_string()),
            ..Default::default()
        })
    }
}
