//! Messaging gateway configuration module

use serde::{Deserialize, Serialize};

/// Which gateway delivers one-time codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagingProvider {
    /// WhatsApp Cloud API authentication template
    WhatsApp,
    /// Log-only gateway for development
    Mock,
}

impl std::str::FromStr for MessagingProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whatsapp" => Ok(MessagingProvider::WhatsApp),
            "mock" => Ok(MessagingProvider::Mock),
            _ => Err(format!("Invalid messaging provider: {}", s)),
        }
    }
}

/// WhatsApp Cloud API settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WhatsAppConfig {
    /// Graph API base URL, including version
    pub api_url: String,
    /// Business phone number id that sends the template
    pub phone_number_id: String,
    /// Permanent or system-user access token
    pub access_token: String,
    /// Approved authentication template name
    pub template_name: String,
    /// Template language code
    pub template_language: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            api_url: String::from("https://graph.facebook.com/v19.0"),
            phone_number_id: String::new(),
            access_token: String::new(),
            template_name: String::from("otp_verification"),
            template_language: String::from("en"),
        }
    }
}

impl WhatsAppConfig {
    /// Both credentials must be present for the gateway to be usable
    pub fn is_configured(&self) -> bool {
        !self.phone_number_id.is_empty() && !self.access_token.is_empty()
    }
}

/// Messaging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MessagingConfig {
    /// Selected provider
    pub provider: MessagingProvider,
    /// WhatsApp settings (used when `provider` is `whatsapp`)
    #[serde(default)]
    pub whatsapp: WhatsAppConfig,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            provider: MessagingProvider::Mock,
            whatsapp: WhatsAppConfig::default(),
        }
    }
}

impl MessagingConfig {
    /// Create from `MESSAGING_PROVIDER` and `WHATSAPP_*` environment variables
    pub fn from_env() -> Self {
        let defaults = WhatsAppConfig::default();
        Self {
            provider: std::env::var("MESSAGING_PROVIDER")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(MessagingProvider::Mock),
            whatsapp: WhatsAppConfig {
                api_url: std::env::var("WHATSAPP_API_URL").unwrap_or(defaults.api_url),
                phone_number_id: std::env::var("WHATSAPP_PHONE_NUMBER_ID").unwrap_or_default(),
                access_token: std::env::var("WHATSAPP_ACCESS_TOKEN").unwrap_or_default(),
                template_name: std::env::var("WHATSAPP_TEMPLATE_NAME")
                    .unwrap_or(defaults.template_name),
                template_language: std::env::var("WHATSAPP_TEMPLATE_LANGUAGE")
                    .unwrap_or(defaults.template_language),
            },
        }
    }
}
