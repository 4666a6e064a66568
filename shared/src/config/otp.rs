//! OTP policy configuration module
//!
//! Issuance throttling, resend cooldown, dispatch timeout and optional code
//! expiry for the mobile verification flow.

use serde::{Deserialize, Serialize};

use super::env_or;
use crate::utils::phone::is_valid_country_code;

/// Longest accepted attempt window (one year)
pub const MAX_ATTEMPT_WINDOW_HOURS: i64 = 24 * 366;

/// Longest accepted resend cooldown (one day)
pub const MAX_RESEND_COOLDOWN_SECONDS: i64 = 24 * 3600;

/// Longest accepted code lifetime (thirty days)
pub const MAX_CODE_TTL_SECONDS: i64 = 30 * 24 * 3600;

/// Longest accepted wait for one gateway call
pub const MAX_DISPATCH_TIMEOUT_SECONDS: u64 = 300;

/// OTP issuance and verification policy
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Fresh issuances allowed inside one attempt window
    #[serde(default = "default_max_fresh_issuances")]
    pub max_fresh_issuances: u32,

    /// Length of the attempt-counting window in hours
    #[serde(default = "default_attempt_window_hours")]
    pub attempt_window_hours: i64,

    /// Minimum spacing between two dispatches in seconds
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: i64,

    /// Upper bound for one messaging gateway call in seconds
    #[serde(default = "default_dispatch_timeout_seconds")]
    pub dispatch_timeout_seconds: u64,

    /// Code lifetime in seconds; `None` keeps codes valid until superseded
    #[serde(default)]
    pub code_ttl_seconds: Option<i64>,

    /// Country calling code prepended to the 10-digit mobile (no `+`)
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            max_fresh_issuances: default_max_fresh_issuances(),
            attempt_window_hours: default_attempt_window_hours(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            dispatch_timeout_seconds: default_dispatch_timeout_seconds(),
            code_ttl_seconds: None,
            country_code: default_country_code(),
        }
    }
}

impl OtpConfig {
    /// Create from `OTP_*` environment variables
    ///
    /// Out-of-range values are replaced by their defaults, see [`OtpConfig::sanitize`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let (config, rejected) = Self {
            max_fresh_issuances: env_or("OTP_MAX_FRESH_ISSUANCES", defaults.max_fresh_issuances),
            attempt_window_hours: env_or("OTP_ATTEMPT_WINDOW_HOURS", defaults.attempt_window_hours),
            resend_cooldown_seconds: env_or(
                "OTP_RESEND_COOLDOWN_SECONDS",
                defaults.resend_cooldown_seconds,
            ),
            dispatch_timeout_seconds: env_or(
                "OTP_DISPATCH_TIMEOUT_SECONDS",
                defaults.dispatch_timeout_seconds,
            ),
            code_ttl_seconds: std::env::var("OTP_CODE_TTL_SECONDS")
                .ok()
                .and_then(|v| v.trim().parse().ok()),
            country_code: std::env::var("OTP_COUNTRY_CODE")
                .map(|cc| cc.trim().trim_start_matches('+').to_string())
                .unwrap_or(defaults.country_code),
        }
        .sanitize();

        for setting in rejected {
            tracing::warn!(setting = setting, "OTP setting out of range, using the default");
        }
        config
    }

    /// Replace every out-of-range value with its default
    ///
    /// Returns the cleaned configuration and the names of the environment
    /// variables whose values were rejected.
    pub fn sanitize(mut self) -> (Self, Vec<&'static str>) {
        let defaults = Self::default();
        let mut rejected = Vec::new();

        if self.max_fresh_issuances == 0 {
            self.max_fresh_issuances = defaults.max_fresh_issuances;
            rejected.push("OTP_MAX_FRESH_ISSUANCES");
        }
        if !(1..=MAX_ATTEMPT_WINDOW_HOURS).contains(&self.attempt_window_hours) {
            self.attempt_window_hours = defaults.attempt_window_hours;
            rejected.push("OTP_ATTEMPT_WINDOW_HOURS");
        }
        if !(1..=MAX_RESEND_COOLDOWN_SECONDS).contains(&self.resend_cooldown_seconds) {
            self.resend_cooldown_seconds = defaults.resend_cooldown_seconds;
            rejected.push("OTP_RESEND_COOLDOWN_SECONDS");
        }
        if !(1..=MAX_DISPATCH_TIMEOUT_SECONDS).contains(&self.dispatch_timeout_seconds) {
            self.dispatch_timeout_seconds = defaults.dispatch_timeout_seconds;
            rejected.push("OTP_DISPATCH_TIMEOUT_SECONDS");
        }
        if let Some(ttl) = self.code_ttl_seconds {
            if !(1..=MAX_CODE_TTL_SECONDS).contains(&ttl) {
                self.code_ttl_seconds = defaults.code_ttl_seconds;
                rejected.push("OTP_CODE_TTL_SECONDS");
            }
        }
        if !is_valid_country_code(&self.country_code) {
            self.country_code = defaults.country_code;
            rejected.push("OTP_COUNTRY_CODE");
        }

        (self, rejected)
    }
}

fn default_max_fresh_issuances() -> u32 {
    3
}

fn default_attempt_window_hours() -> i64 {
    24
}

fn default_resend_cooldown_seconds() -> i64 {
    300
}

fn default_dispatch_timeout_seconds() -> u64 {
    10
}

fn default_country_code() -> String {
    String::from("91")
}
