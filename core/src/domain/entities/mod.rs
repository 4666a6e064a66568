//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{
    OtpRecord, ATTEMPT_WINDOW_HOURS, CODE_LENGTH, MAX_FRESH_ISSUANCES, RESEND_COOLDOWN_SECONDS,
};
