//! Mock messaging gateway for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use co_core::services::MessagingGatewayTrait;
use co_shared::utils::phone::mask_phone_number;

/// Gateway that never leaves the process
///
/// The last code per destination is kept so local tooling and tests can
/// complete a verification without a phone.
#[derive(Clone, Default)]
pub struct MockMessagingGateway {
    codes: Arc<RwLock<HashMap<String, String>>>,
    sent: Arc<AtomicUsize>,
    simulate_failure: Arc<AtomicBool>,
}

impl MockMessagingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail
    pub fn set_simulate_failure(&self, fail: bool) {
        self.simulate_failure.store(fail, Ordering::SeqCst);
    }

    /// Last code delivered to `destination`
    pub fn last_code(&self, destination: &str) -> Option<String> {
        self.codes
            .read()
            .ok()
            .and_then(|codes| codes.get(destination).cloned())
    }

    pub fn message_count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MessagingGatewayTrait for MockMessagingGateway {
    async fn send_code(&self, destination: &str, code: &str) -> Result<String, String> {
        if self.simulate_failure.load(Ordering::SeqCst) {
            tracing::warn!(
                phone = %mask_phone_number(destination),
                "Mock messaging gateway simulating failure"
            );
            return Err("Simulated messaging failure".to_string());
        }

        self.codes
            .write()
            .map_err(|_| "Mock gateway state poisoned".to_string())?
            .insert(destination.to_string(), code.to_string());
        self.sent.fetch_add(1, Ordering::SeqCst);

        let message_id = format!("mock_{}", Uuid::new_v4());
        tracing::info!(
            phone = %mask_phone_number(destination),
            message_id = %message_id,
            "Mock messaging gateway accepted OTP"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
