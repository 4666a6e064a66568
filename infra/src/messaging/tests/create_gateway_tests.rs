//! Unit tests for messaging gateway creation

use co_shared::config::{Environment, MessagingConfig, MessagingProvider, WhatsAppConfig};

use co_core::services::MessagingGatewayTrait;

use crate::messaging::create_messaging_gateway;
use crate::InfrastructureError;

#[test]
fn test_create_mock_gateway() {
    let config = MessagingConfig::default();

    let gateway = create_messaging_gateway(&config, Environment::Development).unwrap();
    assert_eq!(gateway.provider_name(), "Mock");
}

#[test]
fn test_unconfigured_whatsapp_falls_back_outside_production() {
    let config = MessagingConfig {
        provider: MessagingProvider::WhatsApp,
        whatsapp: WhatsAppConfig::default(),
    };

    let gateway = create_messaging_gateway(&config, Environment::Staging).unwrap();
    assert_eq!(gateway.provider_name(), "Mock");
}

#[test]
fn test_unconfigured_whatsapp_rejected_in_production() {
    let config = MessagingConfig {
        provider: MessagingProvider::WhatsApp,
        whatsapp: WhatsAppConfig::default(),
    };

    let result = create_messaging_gateway(&config, Environment::Production);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[cfg(feature = "whatsapp")]
#[test]
fn test_create_whatsapp_gateway() {
    let config = MessagingConfig {
        provider: MessagingProvider::WhatsApp,
        whatsapp: WhatsAppConfig {
            phone_number_id: "1234567890".to_string(),
            access_token: "token".to_string(),
            ..WhatsAppConfig::default()
        },
    };

    let gateway = create_messaging_gateway(&config, Environment::Production).unwrap();
    assert_eq!(gateway.provider_name(), "WhatsApp");
}
