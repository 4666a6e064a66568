//! Domain-specific error types and error handling.

use thiserror::Error;

/// Failures of the OTP lifecycle
///
/// Every variant is scoped to a single request; none of them is fatal to the
/// process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Maximum OTP requests reached. Try again in {retry_after_seconds} seconds")]
    RateLimited { retry_after_seconds: i64 },

    #[error("Please wait {retry_after_seconds} seconds before requesting a new OTP")]
    CooldownActive { retry_after_seconds: i64 },

    #[error("Failed to deliver OTP: {reason}")]
    DeliveryFailed { reason: String },

    #[error("No OTP was requested for this mobile number")]
    NotRequested,

    #[error("Invalid OTP")]
    InvalidCode,

    #[error("Mobile number is already verified")]
    AlreadyVerified,

    #[error("Mobile number has not been verified")]
    NotVerified,

    #[error("OTP has expired")]
    CodeExpired,
}

impl OtpError {
    /// Stable code for API clients
    pub fn reason_code(&self) -> &'static str {
        match self {
            OtpError::RateLimited { .. } => "RATE_LIMITED",
            OtpError::CooldownActive { .. } => "COOLDOWN_ACTIVE",
            OtpError::DeliveryFailed { .. } => "DELIVERY_FAILED",
            OtpError::NotRequested => "NOT_REQUESTED",
            OtpError::InvalidCode => "INVALID_CODE",
            OtpError::AlreadyVerified => "ALREADY_VERIFIED",
            OtpError::NotVerified => "NOT_VERIFIED",
            OtpError::CodeExpired => "CODE_EXPIRED",
        }
    }

    /// Seconds the caller must wait, for throttling failures
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            OtpError::RateLimited { retry_after_seconds }
            | OtpError::CooldownActive { retry_after_seconds } => Some(*retry_after_seconds),
            _ => None,
        }
    }
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),
}

impl DomainError {
    /// The OTP failure wrapped by this error, if any
    pub fn as_otp(&self) -> Option<&OtpError> {
        match self {
            DomainError::Otp(e) => Some(e),
            _ => None,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_after_only_on_throttling() {
        assert_eq!(
            OtpError::CooldownActive { retry_after_seconds: 12 }.retry_after_seconds(),
            Some(12)
        );
        assert_eq!(
            OtpError::RateLimited { retry_after_seconds: 3600 }.retry_after_seconds(),
            Some(3600)
        );
        assert_eq!(OtpError::InvalidCode.retry_after_seconds(), None);
    }

    #[test]
    fn test_domain_error_wraps_otp_error() {
        let error: DomainError = OtpError::NotRequested.into();
        assert_eq!(error.as_otp(), Some(&OtpError::NotRequested));
        assert_eq!(error.to_string(), "No OTP was requested for this mobile number");
    }
}
