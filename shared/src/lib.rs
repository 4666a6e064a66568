//! Shared utilities and common types for the Consultly server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Utility functions (mobile number validation, masking)
//! - API response envelope

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, DatabaseConfig, Environment, LoggingConfig, MessagingConfig, MessagingProvider,
    OtpConfig, ServerConfig, StorageBackend,
};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::phone;
