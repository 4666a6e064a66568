use serde::{Deserialize, Serialize};
use validator::Validate;

use co_core::errors::DomainError;
use co_core::services::IssuanceKind;
use co_shared::utils::phone::{is_valid_subscriber_number, normalize_mobile};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestOtpRequest {
    /// Subscriber number, optionally formatted or prefixed with the country code
    /// Examples: "9876543210", "98765 43210", "+91 98765 43210"
    #[validate(length(min = 10, max = 20))]
    pub mobile: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    #[validate(length(min = 10, max = 20))]
    pub mobile: String,

    /// 6-digit code received over WhatsApp
    #[validate(length(equal = 6))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 10, max = 20))]
    pub mobile: String,

    #[validate(length(equal = 6))]
    pub code: String,

    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestOtpResponse {
    pub message: String,
    pub kind: IssuanceKind,
    pub attempts: u32,
    pub resend_after_seconds: i64, // seconds until another code can be requested
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub verified: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetPasswordResponse {
    pub message: String,
}

/// Reduce a submitted mobile number to its 10-digit subscriber part
///
/// Formatting characters are dropped and a leading `country_code` is
/// stripped when the remaining digits would otherwise be too long.
pub fn subscriber_number(raw: &str, country_code: &str) -> Result<String, DomainError> {
    let digits = normalize_mobile(raw);
    let country_code = country_code.trim_start_matches('+');

    let subscriber = match digits.strip_prefix(country_code) {
        Some(rest) if digits.len() > 10 => rest.to_string(),
        _ => digits,
    };

    if is_valid_subscriber_number(&subscriber) {
        Ok(subscriber)
    } else {
        Err(DomainError::Validation {
            message: "Mobile number must have 10 digits".to_string(),
        })
    }
}

/// Codes are exactly six ASCII digits
pub fn check_code_format(code: &str) -> Result<(), DomainError> {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DomainError::Validation {
            message: "OTP must be 6 digits".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscriber_number_accepts_formatting() {
        assert_eq!(subscriber_number("9876543210", "91").unwrap(), "9876543210");
        assert_eq!(subscriber_number("98765 43210", "91").unwrap(), "9876543210");
        assert_eq!(subscriber_number("+91 98765-43210", "91").unwrap(), "9876543210");
        assert_eq!(subscriber_number("919876543210", "+91").unwrap(), "9876543210");
    }

    #[test]
    fn test_subscriber_number_rejects_wrong_length() {
        assert!(subscriber_number("987654321", "91").is_err());
        assert!(subscriber_number("19876543210", "91").is_err());
        assert!(subscriber_number("abcdefghij", "91").is_err());
    }

    #[test]
    fn test_code_format() {
        assert!(check_code_format("042917").is_ok());
        assert!(check_code_format("42917").is_err());
        assert!(check_code_format("04291a").is_err());
        assert!(check_code_format("٠١٢٣٤٥").is_err());
    }

    #[test]
    fn test_request_validation() {
        let request = VerifyOtpRequest {
            mobile: "9876543210".to_string(),
            code: "12345".to_string(),
        };
        assert!(request.validate().is_err());

        let request = ResetPasswordRequest {
            mobile: "9876543210".to_string(),
            code: "123456".to_string(),
            new_password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
