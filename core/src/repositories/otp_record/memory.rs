//! In-memory implementation of OtpRecordRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

use super::trait_::OtpRecordRepository;

/// Process-local record store
///
/// Backs the `memory` storage backend and the test suites. Writes can be made
/// to fail on demand to exercise storage error paths.
#[derive(Clone)]
pub struct InMemoryOtpRecordRepository {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryOtpRecordRepository {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            fail_writes: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent `upsert` and `delete` return an internal error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed or overwrite a record directly
    pub async fn insert(&self, record: OtpRecord) {
        self.records.write().await.insert(record.mobile.clone(), record);
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_writable(&self) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "OTP record store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for InMemoryOtpRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpRecordRepository for InMemoryOtpRecordRepository {
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<OtpRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(mobile).cloned())
    }

    async fn upsert(&self, record: &OtpRecord) -> Result<(), DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        records.insert(record.mobile.clone(), record.clone());
        Ok(())
    }

    async fn delete(&self, mobile: &str) -> Result<bool, DomainError> {
        self.check_writable()?;
        let mut records = self.records.write().await;
        Ok(records.remove(mobile).is_some())
    }
}
