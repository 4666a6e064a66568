//! Password reset for consultants, gated on a completed OTP verification

mod service;


pub use service::{PasswordResetConfig, PasswordResetService};
