//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the Consultly backend.
//! It provides concrete implementations of the repository and messaging
//! traits defined in `co_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: MySQL implementations using SQLx
//! - **Messaging**: WhatsApp Cloud API gateway and a log-only mock gateway
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `whatsapp`: Enable the WhatsApp Cloud API gateway (default)

use co_core::errors::DomainError;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Messaging module - OTP delivery gateways
pub mod messaging;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// HTTP request error for external services
    #[cfg(feature = "whatsapp")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Messaging gateway error
    #[error("Messaging error: {0}")]
    Messaging(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
