//! OTP record entity for WhatsApp-based mobile verification.
//!
//! One record exists per mobile number. All time-dependent helpers take the
//! current instant as an argument so the lifecycle can be driven by an
//! injected clock.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Fresh issuances allowed inside one attempt window
pub const MAX_FRESH_ISSUANCES: u32 = 3;

/// Length of the attempt-counting window
pub const ATTEMPT_WINDOW_HOURS: i64 = 24;

/// Minimum spacing between two dispatches
pub const RESEND_COOLDOWN_SECONDS: i64 = 300;

/// Active OTP state for one mobile number
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// 10-digit subscriber number; immutable once created
    pub mobile: String,

    /// Current one-time code, overwritten on every (re-)issuance
    pub code: String,

    /// Fresh issuances within the current window (resends excluded)
    pub attempts: u32,

    /// Start of the current attempt-counting window
    pub first_attempt_at: DateTime<Utc>,

    /// Most recent dispatch, fresh or resend
    pub last_sent_at: DateTime<Utc>,

    /// Whether a submitted code has matched `code`
    pub verified: bool,
}

impl std::fmt::Debug for OtpRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpRecord")
            .field("mobile", &self.mobile)
            .field("code", &"******")
            .field("attempts", &self.attempts)
            .field("first_attempt_at", &self.first_attempt_at)
            .field("last_sent_at", &self.last_sent_at)
            .field("verified", &self.verified)
            .finish()
    }
}

impl OtpRecord {
    /// Creates the record for a first issuance
    pub fn new(mobile: String, code: String, now: DateTime<Utc>) -> Self {
        Self {
            mobile,
            code,
            attempts: 1,
            first_attempt_at: now,
            last_sent_at: now,
            verified: false,
        }
    }

    /// Whether the attempt-counting window has run out
    pub fn window_expired(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.first_attempt_at >= window
    }

    /// Seconds left in the current attempt window, rounded up
    pub fn window_remaining(&self, now: DateTime<Utc>, window: Duration) -> i64 {
        ceil_seconds(self.first_attempt_at + window - now)
    }

    /// Seconds left before another dispatch is allowed, rounded up
    ///
    /// Returns `None` once the cooldown has elapsed.
    pub fn cooldown_remaining(&self, now: DateTime<Utc>, cooldown: Duration) -> Option<i64> {
        let elapsed = now - self.last_sent_at;
        if elapsed < cooldown {
            Some(ceil_seconds(cooldown - elapsed))
        } else {
            None
        }
    }

    /// Whether the issuance cap is reached inside a live window
    pub fn is_rate_limited(&self, now: DateTime<Utc>, window: Duration, max_fresh: u32) -> bool {
        self.attempts >= max_fresh && !self.window_expired(now, window)
    }

    /// Resend inside the current window; `attempts` is left alone
    pub fn resend(&mut self, code: String, now: DateTime<Utc>) {
        self.code = code;
        self.last_sent_at = now;
        self.verified = false;
    }

    /// Fresh issuance after the window expired
    pub fn restart_window(&mut self, code: String, now: DateTime<Utc>) {
        self.code = code;
        self.attempts = 1;
        self.first_attempt_at = now;
        self.last_sent_at = now;
        self.verified = false;
    }

    pub fn mark_verified(&mut self) {
        self.verified = true;
    }

    /// Exact comparison against the active code, in constant time
    pub fn matches(&self, submitted: &str) -> bool {
        if self.code.len() != submitted.len() {
            return false;
        }
        constant_time_eq(self.code.as_bytes(), submitted.as_bytes())
    }

    /// Whether the code outlived `ttl` since it was last sent
    pub fn is_code_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now - self.last_sent_at >= ttl
    }
}

/// Whole seconds in `duration`, rounded up; never negative
fn ceil_seconds(duration: Duration) -> i64 {
    if duration <= Duration::zero() {
        return 0;
    }
    let whole = duration.num_seconds();
    if duration > Duration::seconds(whole) {
        whole + 1
    } else {
        whole
    }
}
