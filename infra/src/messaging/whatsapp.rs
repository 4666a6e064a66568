//! WhatsApp Cloud API gateway
//!
//! Sends the code through a pre-approved authentication template. The code is
//! passed twice: as the body parameter and as the copy-code button parameter.
//!
//! A send is a single HTTP request. There is no retry here; the OTP service
//! bounds the call with its own timeout and reports a delivery failure.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use co_core::services::MessagingGatewayTrait;
use co_shared::config::WhatsAppConfig;
use co_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

/// WhatsApp Cloud API gateway
pub struct WhatsAppGateway {
    client: Client,
    config: WhatsAppConfig,
}

impl WhatsAppGateway {
    /// Create a new WhatsApp gateway
    pub fn new(config: WhatsAppConfig) -> Result<Self, InfrastructureError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        tracing::info!(
            template = %config.template_name,
            "WhatsApp messaging gateway initialized"
        );

        Ok(Self { client, config })
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/{}/messages",
            self.config.api_url.trim_end_matches('/'),
            self.config.phone_number_id
        )
    }

    /// Authentication template payload for `destination`
    fn build_payload(&self, destination: &str, code: &str) -> Value {
        json!({
            "messaging_product": "whatsapp",
            "recipient_type": "individual",
            "to": destination,
            "type": "template",
            "template": {
                "name": self.config.template_name,
                "language": { "code": self.config.template_language },
                "components": [
                    {
                        "type": "body",
                        "parameters": [{ "type": "text", "text": code }]
                    },
                    {
                        "type": "button",
                        "sub_type": "url",
                        "index": "0",
                        "parameters": [{ "type": "text", "text": code }]
                    }
                ]
            }
        })
    }

    fn parse_message_id(body: &str) -> Result<String, InfrastructureError> {
        let response: SendResponse = serde_json::from_str(body).map_err(|e| {
            InfrastructureError::Messaging(format!("Unexpected WhatsApp response: {}", e))
        })?;

        response
            .messages
            .into_iter()
            .next()
            .map(|m| m.id)
            .ok_or_else(|| {
                InfrastructureError::Messaging("WhatsApp response has no message id".to_string())
            })
    }

    fn parse_error(status: reqwest::StatusCode, body: &str) -> InfrastructureError {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(err) => InfrastructureError::Messaging(format!(
                "WhatsApp API error {} (code {}): {}",
                status,
                err.error.code.unwrap_or_default(),
                err.error.message
            )),
            Err(_) => InfrastructureError::Messaging(format!("WhatsApp API error {}", status)),
        }
    }

    async fn send_template(&self, destination: &str, code: &str) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .post(self.messages_url())
            .bearer_auth(&self.config.access_token)
            .json(&self.build_payload(destination, code))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        Self::parse_message_id(&body)
    }
}

#[async_trait]
impl MessagingGatewayTrait for WhatsAppGateway {
    async fn send_code(&self, destination: &str, code: &str) -> Result<String, String> {
        match self.send_template(destination, code).await {
            Ok(message_id) => {
                tracing::info!(
                    phone = %mask_phone_number(destination),
                    message_id = %message_id,
                    "WhatsApp OTP message accepted"
                );
                Ok(message_id)
            }
            Err(e) => {
                tracing::error!(
                    phone = %mask_phone_number(destination),
                    error = %e,
                    "Failed to send WhatsApp OTP message"
                );
                Err(e.to_string())
            }
        }
    }

    fn provider_name(&self) -> &str {
        "WhatsApp"
    }
}
