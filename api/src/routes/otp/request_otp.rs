use actix_web::{web, HttpResponse};
use validator::Validate;

use co_core::repositories::{ConsultantRepository, OtpRecordRepository};
use co_core::services::{IssuanceKind, MessagingGatewayTrait};
use co_shared::types::ApiResponse;
use co_shared::utils::phone::mask_phone_number;

use crate::dto::otp::{subscriber_number, RequestOtpRequest, RequestOtpResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/otp/request
///
/// Sends a one-time code to the mobile number over WhatsApp.
///
/// # Request Body
///
/// ```json
/// { "mobile": "9876543210" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "message": "OTP sent over WhatsApp",
///         "kind": "fresh",
///         "attempts": 1,
///         "resend_after_seconds": 300
///     },
///     "timestamp": "2026-01-01T10:00:00Z"
/// }
/// ```
///
/// ## Errors
/// - 400 `VALIDATION_ERROR`
/// - 429 `RATE_LIMITED` / `COOLDOWN_ACTIVE` with `retry_after_seconds`
/// - 502 `DELIVERY_FAILED`
pub async fn request_otp<G, R, C>(
    state: web::Data<AppState<G, R, C>>,
    request: web::Json<RequestOtpRequest>,
) -> HttpResponse
where
    G: MessagingGatewayTrait + ?Sized + 'static,
    R: OtpRecordRepository + ?Sized + 'static,
    C: ConsultantRepository + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let mobile = match subscriber_number(&request.mobile, &state.otp_service.config().country_code) {
        Ok(mobile) => mobile,
        Err(error) => return handle_domain_error(&error),
    };

    tracing::info!(phone = %mask_phone_number(&mobile), "Processing OTP request");

    match state.otp_service.request_otp(&mobile).await {
        Ok(issued) => {
            let message = match issued.kind {
                IssuanceKind::Resend => "A new OTP has been sent over WhatsApp",
                IssuanceKind::Fresh | IssuanceKind::WindowReset => "OTP sent over WhatsApp",
            };

            HttpResponse::Ok().json(ApiResponse::success(RequestOtpResponse {
                message: message.to_string(),
                kind: issued.kind,
                attempts: issued.attempts,
                resend_after_seconds: issued.resend_after_seconds,
            }))
        }
        Err(error) => handle_domain_error(&error),
    }
}
