//! Mapping of domain failures onto HTTP responses
//!
//! Every failure becomes an `ApiResponse` envelope with `success: false`, a
//! stable `reason` code and a readable message. Throttled calls also carry
//! `retry_after_seconds` and a `Retry-After` header.

use actix_web::{
    http::{header, StatusCode},
    HttpResponse,
};
use validator::ValidationErrors;

use co_core::errors::{DomainError, OtpError};
use co_shared::types::ApiResponse;

/// HTTP status for an OTP failure
pub fn otp_error_status(error: &OtpError) -> StatusCode {
    match error {
        OtpError::RateLimited { .. } | OtpError::CooldownActive { .. } => {
            StatusCode::TOO_MANY_REQUESTS
        }
        OtpError::DeliveryFailed { .. } => StatusCode::BAD_GATEWAY,
        OtpError::NotRequested => StatusCode::NOT_FOUND,
        OtpError::InvalidCode | OtpError::CodeExpired | OtpError::NotVerified => {
            StatusCode::BAD_REQUEST
        }
        OtpError::AlreadyVerified => StatusCode::CONFLICT,
    }
}

/// Convert a domain error into a JSON error response
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Otp(otp) => {
            let status = otp_error_status(otp);
            let body = ApiResponse::<()>::error(otp.reason_code(), public_message(otp))
                .with_retry_after(otp.retry_after_seconds());

            let mut response = HttpResponse::build(status);
            if let Some(seconds) = otp.retry_after_seconds() {
                response.insert_header((header::RETRY_AFTER, seconds.to_string()));
            }
            response.json(body)
        }
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ApiResponse::<()>::error("VALIDATION_ERROR", message))
        }
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(
            ApiResponse::<()>::error("NOT_FOUND", format!("{} not found", resource)),
        ),
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error while handling request");
            HttpResponse::InternalServerError().json(ApiResponse::<()>::error(
                "INTERNAL_ERROR",
                "An internal error occurred",
            ))
        }
    }
}

/// Convert validator errors into a 400 response naming the offending fields
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort_unstable();

    HttpResponse::BadRequest().json(ApiResponse::<()>::error(
        "VALIDATION_ERROR",
        format!("Invalid request fields: {}", fields.join(", ")),
    ))
}

// Gateway failure details stay in the logs
fn public_message(error: &OtpError) -> String {
    match error {
        OtpError::DeliveryFailed { .. } => {
            "Could not deliver the OTP over WhatsApp. Please try again".to_string()
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_error_statuses() {
        let cases = [
            (
                OtpError::RateLimited {
                    retry_after_seconds: 10,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                OtpError::CooldownActive {
                    retry_after_seconds: 10,
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                OtpError::DeliveryFailed {
                    reason: "timeout".to_string(),
                },
                StatusCode::BAD_GATEWAY,
            ),
            (OtpError::NotRequested, StatusCode::NOT_FOUND),
            (OtpError::InvalidCode, StatusCode::BAD_REQUEST),
            (OtpError::CodeExpired, StatusCode::BAD_REQUEST),
            (OtpError::NotVerified, StatusCode::BAD_REQUEST),
            (OtpError::AlreadyVerified, StatusCode::CONFLICT),
        ];

        for (error, status) in cases {
            assert_eq!(otp_error_status(&error), status, "{:?}", error);
        }
    }

    #[test]
    fn test_throttled_response_has_retry_after_header() {
        let error = DomainError::Otp(OtpError::CooldownActive {
            retry_after_seconds: 241,
        });
        let response = handle_domain_error(&error);

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers().get(header::RETRY_AFTER).unwrap(),
            "241"
        );
    }

    #[test]
    fn test_internal_error_status() {
        let error = DomainError::Internal {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            handle_domain_error(&error).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
