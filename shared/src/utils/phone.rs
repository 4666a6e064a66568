//! Mobile number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// 10-digit subscriber number, no country code
static SUBSCRIBER_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{10}$").unwrap()
});

// Country calling code without '+'
static COUNTRY_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9][0-9]{0,3}$").unwrap()
});

/// Normalize a mobile number by removing common formatting characters
pub fn normalize_mobile(mobile: &str) -> String {
    mobile.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Check if a string is a 10-digit subscriber number (no formatting allowed)
pub fn is_valid_subscriber_number(mobile: &str) -> bool {
    SUBSCRIBER_NUMBER_REGEX.is_match(mobile)
}

/// Check if a string is a country calling code such as `91` or `1`
pub fn is_valid_country_code(country_code: &str) -> bool {
    COUNTRY_CODE_REGEX.is_match(country_code)
}

/// Build the messaging destination for a subscriber number
///
/// WhatsApp expects the full international number without the leading `+`,
/// e.g. `919876543210`.
pub fn to_destination(country_code: &str, mobile: &str) -> String {
    format!("{}{}", country_code.trim_start_matches('+'), mobile)
}

/// Mask a mobile number for logs (e.g., 987****210)
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_mobile(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 3..]
        )
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_mobile() {
        assert_eq!(normalize_mobile("98765-43210"), "9876543210");
        assert_eq!(normalize_mobile("(987) 654 3210"), "9876543210");
    }

    #[test]
    fn test_subscriber_number_validation() {
        assert!(is_valid_subscriber_number("9876543210"));
        assert!(is_valid_subscriber_number("0123456789"));
        assert!(!is_valid_subscriber_number("987654321"));
        assert!(!is_valid_subscriber_number("98765432101"));
        assert!(!is_valid_subscriber_number("98765 43210"));
        assert!(!is_valid_subscriber_number("+919876543210"));
    }

    #[test]
    fn test_country_code_validation() {
        assert!(is_valid_country_code("91"));
        assert!(is_valid_country_code("1"));
        assert!(!is_valid_country_code("+91"));
        assert!(!is_valid_country_code("091"));
    }

    #[test]
    fn test_to_destination() {
        assert_eq!(to_destination("91", "9876543210"), "919876543210");
        assert_eq!(to_destination("+91", "9876543210"), "919876543210");
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("9876543210"), "987****210");
        assert_eq!(mask_phone_number("919876543210"), "919****210");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}
