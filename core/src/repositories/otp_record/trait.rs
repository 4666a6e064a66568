//! OTP record repository trait defining the record-store contract.
//!
//! The store is keyed by mobile number and holds at most one record per key.
//! Implementations must make `upsert` a single write so that a record is
//! either fully replaced or left untouched.

use async_trait::async_trait;

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::DomainError;

/// Repository trait for OTP record persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use co_core::domain::entities::OtpRecord;
/// use co_core::errors::DomainError;
/// use co_core::repositories::OtpRecordRepository;
///
/// struct KeyValueOtpRecordRepository {
///     // store handle
/// }
///
/// #[async_trait]
/// impl OtpRecordRepository for KeyValueOtpRecordRepository {
///     async fn find_by_mobile(&self, mobile: &str) -> Result<Option<OtpRecord>, DomainError> {
///         Ok(None)
///     }
///
///     async fn upsert(&self, record: &OtpRecord) -> Result<(), DomainError> {
///         Ok(())
///     }
///
///     async fn delete(&self, mobile: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait OtpRecordRepository: Send + Sync {
    /// Find the record for a mobile number
    ///
    /// # Returns
    /// * `Ok(Some(OtpRecord))` - Record found
    /// * `Ok(None)` - No OTP has been requested for this number
    /// * `Err(DomainError)` - Storage error
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<OtpRecord>, DomainError>;

    /// Insert the record, or replace the existing record for the same mobile
    async fn upsert(&self, record: &OtpRecord) -> Result<(), DomainError>;

    /// Delete the record for a mobile number
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing was stored for this number
    async fn delete(&self, mobile: &str) -> Result<bool, DomainError>;
}
