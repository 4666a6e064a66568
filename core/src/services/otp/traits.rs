//! Trait for messaging gateway integration

use async_trait::async_trait;

/// Out-of-band delivery of one-time codes (WhatsApp, SMS, ...)
#[async_trait]
pub trait MessagingGatewayTrait: Send + Sync {
    /// Deliver `code` to `destination` (full international number, no `+`)
    ///
    /// Returns the provider message id on success. The error string is only
    /// logged and surfaced as a delivery failure; it is never parsed.
    async fn send_code(&self, destination: &str, code: &str) -> Result<String, String>;

    /// Provider name for logs
    fn provider_name(&self) -> &str;
}
