//! Types for OTP service results

use serde::{Deserialize, Serialize};

/// How a successful request changed the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuanceKind {
    /// No live record existed (first request, or the number was verified before)
    Fresh,
    /// The attempt window had expired; the counter restarted at 1
    WindowReset,
    /// New code inside the current window; the counter is unchanged
    Resend,
}

/// Result of a successful OTP request
#[derive(Debug, Clone)]
pub struct OtpIssued {
    /// Message id returned by the messaging gateway
    pub message_id: String,
    /// Whether this was a fresh issuance or a resend
    pub kind: IssuanceKind,
    /// Fresh issuances counted in the current window after this request
    pub attempts: u32,
    /// Seconds until another code can be requested
    pub resend_after_seconds: i64,
}
