//! Password reset service implementation

use std::sync::Arc;
use tracing;

use co_shared::utils::phone::mask_phone_number;

use crate::errors::{DomainError, DomainResult};
use crate::repositories::consultant::ConsultantRepository;
use crate::repositories::otp_record::OtpRecordRepository;
use crate::services::otp::{MessagingGatewayTrait, OtpService};

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct PasswordResetConfig {
    pub min_password_length: usize,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordResetConfig {
    fn default() -> Self {
        Self {
            min_password_length: MIN_PASSWORD_LENGTH,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Replaces a consultant password once their mobile number is verified
pub struct PasswordResetService<G, R, C>
where
    G: MessagingGatewayTrait + ?Sized,
    R: OtpRecordRepository + ?Sized,
    C: ConsultantRepository + ?Sized,
{
    otp_service: Arc<OtpService<G, R>>,
    consultants: Arc<C>,
    config: PasswordResetConfig,
}

impl<G, R, C> PasswordResetService<G, R, C>
where
    G: MessagingGatewayTrait + ?Sized,
    R: OtpRecordRepository + ?Sized,
    C: ConsultantRepository + ?Sized,
{
    pub fn new(
        otp_service: Arc<OtpService<G, R>>,
        consultants: Arc<C>,
        config: PasswordResetConfig,
    ) -> Self {
        Self {
            otp_service,
            consultants,
            config,
        }
    }

    /// Set a new password for the consultant owning `mobile`
    ///
    /// The OTP record must already be verified and `code` must match it.
    /// On success the record is deleted so the same verification cannot be
    /// used for a second reset, unless a newer code was requested meanwhile.
    pub async fn reset_password(
        &self,
        mobile: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let masked = mask_phone_number(mobile);

        if new_password.chars().count() < self.config.min_password_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Password must be at least {} characters",
                    self.config.min_password_length
                ),
            });
        }

        self.otp_service.confirm_verified(mobile, code).await?;

        if !self.consultants.exists_by_mobile(mobile).await? {
            return Err(self.unknown_consultant(&masked));
        }

        let password_hash = self.hash_password(new_password).await?;

        let updated = self
            .consultants
            .update_password_hash(mobile, &password_hash)
            .await?;
        if !updated {
            return Err(self.unknown_consultant(&masked));
        }

        // A code issued while the hash was computed must survive
        self.otp_service.discard_verified(mobile, code).await?;

        tracing::info!(phone = %masked, event = "password_reset", "Consultant password reset");
        Ok(())
    }

    fn unknown_consultant(&self, masked: &str) -> DomainError {
        tracing::warn!(
            phone = %masked,
            event = "password_reset_unknown_consultant",
            "Password reset for a mobile number with no consultant"
        );
        DomainError::NotFound {
            resource: "Consultant".to_string(),
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }
}
