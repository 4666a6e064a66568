//! Business services containing domain logic and use cases.

pub mod clock;
pub mod otp;
pub mod password_reset;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use otp::{IssuanceKind, MessagingGatewayTrait, OtpIssued, OtpService, OtpServiceConfig};
pub use password_reset::{PasswordResetConfig, PasswordResetService};
