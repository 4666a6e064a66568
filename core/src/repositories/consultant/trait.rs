//! Consultant credential repository trait.
//!
//! Consultant profiles, approval and business records are managed elsewhere;
//! the OTP flows only ever need to look a consultant up by mobile number and
//! replace the stored password hash.

use async_trait::async_trait;

use crate::errors::DomainError;

/// Repository trait for consultant credential operations
#[async_trait]
pub trait ConsultantRepository: Send + Sync {
    /// Check whether a consultant is registered with this mobile number
    async fn exists_by_mobile(&self, mobile: &str) -> Result<bool, DomainError>;

    /// Replace the password hash of the consultant owning `mobile`
    ///
    /// # Returns
    /// * `Ok(true)` - Hash updated
    /// * `Ok(false)` - No consultant with this mobile number
    /// * `Err(DomainError)` - Storage error
    async fn update_password_hash(
        &self,
        mobile: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError>;
}
