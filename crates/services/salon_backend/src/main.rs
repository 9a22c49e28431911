// File: services/salon_backend/src/main.rs
use axum::Router;
use salon_common::{config_error, not_found_handler, Context, HealthInfo, SalonError};
use salon_config::{load_config, redacted};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

const SERVICE_NAME: &str = "Book Appointment";

#[tokio::main]
async fn main() -> Result<(), SalonError> {
    salon_common::logging::init();

    let config = Arc::new(load_config().map_err(config_error)?);
    info!(
        "Loaded configuration: {}",
        serde_json::to_string(&redacted(&config)).unwrap_or_default()
    );

    let health = HealthInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: salon_meevo::FEATURES.iter().map(|f| f.to_string()).collect(),
    };

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = Router::new()
        .merge(salon_common::routes(health))
        .merge(salon_meevo::routes(config.clone())?);

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use salon_meevo::doc::MeevoApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Keep It Cut Booking API",
                version = "2.0.0",
                description = "Simplified appointment booking in front of Meevo",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            components(),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(MeevoApiDoc::openapi());
        info!("Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    let app = app
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Starting server at http://{}", addr);
    info!("Endpoints: POST /book, GET /services, GET /health");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;
    Ok(())
}
