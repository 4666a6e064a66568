//! In-memory implementation of ConsultantRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::errors::DomainError;

use super::trait_::ConsultantRepository;

/// Consultant credentials keyed by mobile number
#[derive(Clone, Default)]
pub struct InMemoryConsultantRepository {
    password_hashes: Arc<RwLock<HashMap<String, Option<String>>>>,
}

impl InMemoryConsultantRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consultant without a password
    pub async fn register(&self, mobile: &str) {
        self.password_hashes
            .write()
            .await
            .entry(mobile.to_string())
            .or_insert(None);
    }

    /// Stored password hash, if the consultant exists and has one
    pub async fn password_hash(&self, mobile: &str) -> Option<String> {
        self.password_hashes
            .read()
            .await
            .get(mobile)
            .cloned()
            .flatten()
    }
}

#[async_trait]
impl ConsultantRepository for InMemoryConsultantRepository {
    async fn exists_by_mobile(&self, mobile: &str) -> Result<bool, DomainError> {
        Ok(self.password_hashes.read().await.contains_key(mobile))
    }

    async fn update_password_hash(
        &self,
        mobile: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let mut hashes = self.password_hashes.write().await;
        match hashes.get_mut(mobile) {
            Some(slot) => {
                *slot = Some(password_hash.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
