use actix_web::{web, HttpResponse};
use validator::Validate;

use co_core::repositories::{ConsultantRepository, OtpRecordRepository};
use co_core::services::MessagingGatewayTrait;
use co_shared::types::ApiResponse;

use crate::dto::otp::{
    check_code_format, subscriber_number, ResetPasswordRequest, ResetPasswordResponse,
};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/otp/password-reset
///
/// Requires the mobile number to have been verified with the same code.
/// The verification is consumed on success.
pub async fn reset_password<G, R, C>(
    state: web::Data<AppState<G, R, C>>,
    request: web::Json<ResetPasswordRequest>,
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

    match state
        .password_reset
        .reset_password(&mobile, &request.code, &request.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(ApiResponse::success(ResetPasswordResponse {
            message: "Password updated successfully".to_string(),
        })),
        Err(error) => handle_domain_error(&error),
    }
}
