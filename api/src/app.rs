//! Application factory
//!
//! Builds the Actix-web application around an [`AppState`].

use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use co_core::repositories::{ConsultantRepository, OtpRecordRepository};
use co_core::services::MessagingGatewayTrait;
use co_shared::config::Environment;
use co_shared::types::{ApiResponse, HealthResponse};

use crate::middleware::cors::create_cors;
use crate::routes::otp::{self, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<G, R, C>(
    app_state: web::Data<AppState<G, R, C>>,
    environment: Environment,
    json_limit: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    G: MessagingGatewayTrait + ?Sized + 'static,
    R: OtpRecordRepository + ?Sized + 'static,
    C: ConsultantRepository + ?Sized + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(web::JsonConfig::default().limit(json_limit).error_handler(|err, _req| {
            let message = err.to_string();
            actix_web::error::InternalError::from_response(
                err,
                HttpResponse::BadRequest()
                    .json(ApiResponse::<()>::error("VALIDATION_ERROR", message)),
            )
            .into()
        }))
        .wrap(create_cors(environment))
        .wrap(TracingLogger::default())
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/v1").configure(otp::configure::<G, R, C>))
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        "consultly-api",
        env!("CARGO_PKG_VERSION"),
    ))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::error(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
