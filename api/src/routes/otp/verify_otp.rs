use actix_web::{web, HttpResponse};
use validator::Validate;

use co_core::repositories::{ConsultantRepository, OtpRecordRepository};
use co_core::services::MessagingGatewayTrait;
use co_shared::types::ApiResponse;

use crate::dto::otp::{check_code_format, subscriber_number, VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/otp/verify
///
/// Body: `{ "mobile": "9876543210", "code": "042917" }`.
/// Responds with `{ "verified": true }` on a match; a wrong code is a 400
/// `INVALID_CODE` and may be retried.
pub async fn verify_otp<G, R, C>(
    state: web::Data<AppState<G, R, C>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    G: MessagingGatewayTrait + ?Sized + 'static,
    R: OtpRecordRepository + ?Sized + 'static,
    C: ConsultantRepository + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    let mobile = match subscriber_number(&request.mobile, &state.otp_service.config().country_code)
        .and_then(|mobile| check_code_format(&request.code).map(|_| mobile))
    {
        Ok(mobile) => mobile,
        Err(error) => return handle_domain_error(&error),
    };

    match state.otp_service.verify_otp(&mobile, &request.code).await {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(VerifyOtpResponse { verified: true })),
        Err(error) => handle_domain_error(&error),
    }
}
