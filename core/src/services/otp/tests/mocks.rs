//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::services::otp::traits::MessagingGatewayTrait;

// Mock messaging gateway for testing
pub struct MockMessagingGateway {
    pub sent_messages: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: AtomicBool,
    pub delay: Option<Duration>,
}

impl MockMessagingGateway {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent_messages: Arc::new(Mutex::new(Vec::new())),
            should_fail: AtomicBool::new(should_fail),
            delay: None,
        }
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(false)
        }
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    pub fn last_code(&self) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .last()
            .map(|(_, code)| code.clone())
    }

    pub fn last_destination(&self) -> Option<String> {
        self.sent_messages
            .lock()
            .unwrap()
            .last()
            .map(|(destination, _)| destination.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent_messages.lock().unwrap().len()
    }
}

#[async_trait]
impl MessagingGatewayTrait for MockMessagingGateway {
    async fn send_code(&self, destination: &str, code: &str) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail.load(Ordering::SeqCst) {
            return Err("WhatsApp API error".to_string());
        }
        let mut sent = self.sent_messages.lock().unwrap();
        sent.push((destination.to_string(), code.to_string()));
        Ok(format!("mock-msg-{}", sent.len()))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
