//! OTP lifecycle module for WhatsApp-based mobile verification
//!
//! This module owns one record per mobile number and enforces:
//! - Issuance throttling (fresh issuances per rolling attempt window)
//! - Resend cooldown between dispatches
//! - One-shot code matching that marks the number as verified

mod config;
mod key_lock;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use traits::MessagingGatewayTrait;
pub use types::{IssuanceKind, OtpIssued};
