//! Configuration for the OTP service

use chrono::Duration;
use co_shared::config::otp::{
    OtpConfig, MAX_ATTEMPT_WINDOW_HOURS, MAX_CODE_TTL_SECONDS, MAX_DISPATCH_TIMEOUT_SECONDS,
    MAX_RESEND_COOLDOWN_SECONDS,
};

use crate::domain::entities::otp_record::{
    ATTEMPT_WINDOW_HOURS, MAX_FRESH_ISSUANCES, RESEND_COOLDOWN_SECONDS,
};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Fresh issuances allowed inside one attempt window
    pub max_fresh_issuances: u32,
    /// Length of the attempt-counting window in hours
    pub attempt_window_hours: i64,
    /// Minimum seconds between two dispatches
    pub resend_cooldown_seconds: i64,
    /// Upper bound for a single gateway call
    pub dispatch_timeout_seconds: u64,
    /// Code lifetime; `None` keeps a code valid until it is superseded
    pub code_ttl_seconds: Option<i64>,
    /// Country calling code used to build the messaging destination
    pub country_code: String,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            max_fresh_issuances: MAX_FRESH_ISSUANCES,
            attempt_window_hours: ATTEMPT_WINDOW_HOURS,
            resend_cooldown_seconds: RESEND_COOLDOWN_SECONDS,
            dispatch_timeout_seconds: 10,
            code_ttl_seconds: None,
            country_code: "91".to_string(),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            max_fresh_issuances: config.max_fresh_issuances,
            attempt_window_hours: config.attempt_window_hours,
            resend_cooldown_seconds: config.resend_cooldown_seconds,
            dispatch_timeout_seconds: config.dispatch_timeout_seconds,
            code_ttl_seconds: config.code_ttl_seconds,
            country_code: config.country_code.clone(),
        }
    }
}

/// Duration accessors clamp each setting to the range `OtpConfig` accepts
impl OtpServiceConfig {
    pub fn attempt_window(&self) -> Duration {
        Duration::hours(self.attempt_window_hours.clamp(1, MAX_ATTEMPT_WINDOW_HOURS))
    }

    pub fn resend_cooldown(&self) -> Duration {
        Duration::seconds(self.resend_cooldown_seconds.clamp(1, MAX_RESEND_COOLDOWN_SECONDS))
    }

    pub fn dispatch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(
            self.dispatch_timeout_seconds
                .clamp(1, MAX_DISPATCH_TIMEOUT_SECONDS),
        )
    }

    pub fn code_ttl(&self) -> Option<Duration> {
        self.code_ttl_seconds
            .map(|ttl| Duration::seconds(ttl.clamp(1, MAX_CODE_TTL_SECONDS)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors_clamp_out_of_range_values() {
        let config = OtpServiceConfig {
            attempt_window_hours: 9_999_999_999_999,
            resend_cooldown_seconds: -1,
            dispatch_timeout_seconds: 0,
            code_ttl_seconds: Some(i64::MAX),
            ..OtpServiceConfig::default()
        };

        assert_eq!(config.attempt_window(), Duration::hours(MAX_ATTEMPT_WINDOW_HOURS));
        assert_eq!(config.resend_cooldown(), Duration::seconds(1));
        assert_eq!(config.dispatch_timeout(), std::time::Duration::from_secs(1));
        assert_eq!(config.code_ttl(), Some(Duration::seconds(MAX_CODE_TTL_SECONDS)));
    }

    #[test]
    fn test_defaults_are_unchanged_by_clamping() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.attempt_window(), Duration::hours(24));
        assert_eq!(config.resend_cooldown(), Duration::seconds(300));
        assert_eq!(config.dispatch_timeout(), std::time::Duration::from_secs(10));
        assert_eq!(config.code_ttl(), None);
    }
}
