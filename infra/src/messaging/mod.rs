//! Messaging Gateway Module
//!
//! Delivers one-time codes to consultants. Every gateway implements the core
//! `MessagingGatewayTrait`, so the OTP service never knows which provider is
//! behind it.
//!
//! ## Providers
//!
//! - **WhatsApp**: Cloud API authentication template (production)
//! - **Mock**: Logs a masked destination and keeps codes in memory

use std::sync::Arc;

use co_core::services::MessagingGatewayTrait;
use co_shared::config::{Environment, MessagingConfig, MessagingProvider};

use crate::InfrastructureError;

pub mod mock_messaging;

#[cfg(feature = "whatsapp")]
pub mod whatsapp;

pub use mock_messaging::MockMessagingGateway;

#[cfg(feature = "whatsapp")]
pub use whatsapp::WhatsAppGateway;

#[cfg(test)]
mod tests;

/// Create a messaging gateway based on configuration
///
/// A WhatsApp provider without credentials is a hard error in production and
/// falls back to the mock gateway everywhere else.
pub fn create_messaging_gateway(
    config: &MessagingConfig,
    environment: Environment,
) -> Result<Arc<dyn MessagingGatewayTrait>, InfrastructureError> {
    match config.provider {
        MessagingProvider::Mock => {
            if environment.is_production() {
                tracing::warn!("Mock messaging gateway selected in production");
            }
            Ok(Arc::new(MockMessagingGateway::new()))
        }
        MessagingProvider::WhatsApp => create_whatsapp_gateway(config, environment),
    }
}

#[cfg(feature = "whatsapp")]
fn create_whatsapp_gateway(
    config: &MessagingConfig,
    environment: Environment,
) -> Result<Arc<dyn MessagingGatewayTrait>, InfrastructureError> {
    if !config.whatsapp.is_configured() {
        if environment.is_production() {
            return Err(InfrastructureError::Config(
                "WHATSAPP_PHONE_NUMBER_ID and WHATSAPP_ACCESS_TOKEN must be set".to_string(),
            ));
        }
        tracing::warn!("WhatsApp credentials missing, falling back to mock messaging gateway");
        return Ok(Arc::new(MockMessagingGateway::new()));
    }

    Ok(Arc::new(WhatsAppGateway::new(config.whatsapp.clone())?))
}

#[cfg(not(feature = "whatsapp"))]
fn create_whatsapp_gateway(
    _config: &MessagingConfig,
    environment: Environment,
) -> Result<Arc<dyn MessagingGatewayTrait>, InfrastructureError> {
    if environment.is_production() {
        return Err(InfrastructureError::Config(
            "WhatsApp gateway requires the `whatsapp` feature".to_string(),
        ));
    }
    tracing::warn!("WhatsApp gateway not compiled in, using mock messaging gateway");
    Ok(Arc::new(MockMessagingGateway::new()))
}
