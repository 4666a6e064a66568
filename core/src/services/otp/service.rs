//! Main OTP service implementation

use rand::{rngs::OsRng, Rng};
use std::sync::Arc;
use tracing;

use co_shared::utils::phone::{mask_phone_number, to_destination};

use crate::domain::entities::otp_record::{OtpRecord, CODE_LENGTH};
use crate::errors::{DomainResult, OtpError};
use crate::repositories::otp_record::OtpRecordRepository;
use crate::services::clock::{Clock, SystemClock};

use super::config::OtpServiceConfig;
use super::key_lock::KeyedLock;
use super::traits::MessagingGatewayTrait;
use super::types::{IssuanceKind, OtpIssued};

/// OTP lifecycle service for consultant mobile verification
pub struct OtpService<G, R>
where
    G: MessagingGatewayTrait + ?Sized,
    R: OtpRecordRepository + ?Sized,
{
    /// Messaging gateway used to deliver codes
    gateway: Arc<G>,
    /// Persistent store of OTP records
    records: Arc<R>,
    /// Source of the current instant
    clock: Arc<dyn Clock>,
    /// Service configuration
    config: OtpServiceConfig,
    /// Serializes operations on the same mobile number
    locks: KeyedLock,
}

impl<G, R> OtpService<G, R>
where
    G: MessagingGatewayTrait + ?Sized,
    R: OtpRecordRepository + ?Sized,
{
    /// Create a new OTP service driven by the system clock
    pub fn new(gateway: Arc<G>, records: Arc<R>, config: OtpServiceConfig) -> Self {
        Self::with_clock(gateway, records, Arc::new(SystemClock), config)
    }

    /// Create a new OTP service with an explicit time source
    pub fn with_clock(
        gateway: Arc<G>,
        records: Arc<R>,
        clock: Arc<dyn Clock>,
        config: OtpServiceConfig,
    ) -> Self {
        Self {
            gateway,
            records,
            clock,
            config,
            locks: KeyedLock::new(),
        }
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue (or re-issue) a one-time code for `mobile`
    ///
    /// This method:
    /// 1. Treats a verified record as absent so a new verification can start
    /// 2. Rejects the request while the issuance cap is reached in a live window
    /// 3. Rejects the request while the resend cooldown is running
    /// 4. Sends a fresh code through the messaging gateway
    /// 5. Persists the record only after the gateway accepted the message
    ///
    /// A rejected or undelivered request leaves the stored record untouched.
    pub async fn request_otp(&self, mobile: &str) -> DomainResult<OtpIssued> {
        let _guard = self.locks.lock(mobile).await;
        let now = self.clock.now();
        let masked = mask_phone_number(mobile);

        let existing = match self.records.find_by_mobile(mobile).await? {
            Some(record) if record.verified => {
                tracing::debug!(
                    phone = %masked,
                    event = "otp_verified_record_superseded",
                    "Previous verification completed, starting a new one"
                );
                None
            }
            other => other,
        };

        if let Some(record) = &existing {
            let window = self.config.attempt_window();
            if record.is_rate_limited(now, window, self.config.max_fresh_issuances) {
                let retry_after_seconds = record.window_remaining(now, window);
                tracing::warn!(
                    phone = %masked,
                    attempts = record.attempts,
                    retry_after_seconds = retry_after_seconds,
                    event = "otp_rate_limited",
                    "OTP issuance cap reached for mobile number"
                );
                return Err(OtpError::RateLimited { retry_after_seconds }.into());
            }

            if let Some(retry_after_seconds) =
                record.cooldown_remaining(now, self.config.resend_cooldown())
            {
                tracing::warn!(
                    phone = %masked,
                    retry_after_seconds = retry_after_seconds,
                    event = "otp_cooldown_active",
                    "OTP requested again before cooldown elapsed"
                );
                return Err(OtpError::CooldownActive { retry_after_seconds }.into());
            }
        }

        let code = Self::generate_secure_code();
        let message_id = self.dispatch(mobile, &code).await?;

        let window = self.config.attempt_window();
        let (record, kind) = match existing {
            None => (
                OtpRecord::new(mobile.to_string(), code, now),
                IssuanceKind::Fresh,
            ),
            Some(mut record) if record.window_expired(now, window) => {
                record.restart_window(code, now);
                (record, IssuanceKind::WindowReset)
            }
            Some(mut record) => {
                record.resend(code, now);
                (record, IssuanceKind::Resend)
            }
        };

        self.records.upsert(&record).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "otp_storage_failed",
                "Code was delivered but the OTP record could not be stored"
            );
            e
        })?;

        tracing::info!(
            phone = %masked,
            kind = ?kind,
            attempts = record.attempts,
            message_id = %message_id,
            event = "otp_issued",
            "OTP sent"
        );

        Ok(OtpIssued {
            message_id,
            kind,
            attempts: record.attempts,
            resend_after_seconds: self.config.resend_cooldown_seconds,
        })
    }

    /// Check a submitted code and mark the mobile number as verified
    ///
    /// A wrong code leaves the record as it was, so the caller may retry with
    /// the same code until it is superseded.
    pub async fn verify_otp(&self, mobile: &str, code: &str) -> DomainResult<()> {
        let _guard = self.locks.lock(mobile).await;
        let now = self.clock.now();
        let masked = mask_phone_number(mobile);

        let mut record = self
            .records
            .find_by_mobile(mobile)
            .await?
            .ok_or(OtpError::NotRequested)?;

        if record.verified {
            return Err(OtpError::AlreadyVerified.into());
        }

        if let Some(ttl) = self.config.code_ttl() {
            if record.is_code_expired(now, ttl) {
                tracing::info!(phone = %masked, event = "otp_expired", "Submitted OTP has expired");
                return Err(OtpError::CodeExpired.into());
            }
        }

        if !record.matches(code) {
            tracing::warn!(
                phone = %masked,
                event = "otp_verification_failed",
                "Invalid OTP submitted"
            );
            return Err(OtpError::InvalidCode.into());
        }

        record.mark_verified();
        self.records.upsert(&record).await?;

        tracing::info!(phone = %masked, event = "otp_verified", "Mobile number verified");
        Ok(())
    }

    /// Whether the latest record for `mobile` has been verified
    pub async fn is_verified(&self, mobile: &str) -> DomainResult<bool> {
        Ok(self
            .records
            .find_by_mobile(mobile)
            .await?
            .map(|record| record.verified)
            .unwrap_or(false))
    }

    /// Require a verified record whose code equals `code`
    ///
    /// Used by flows that consume a completed verification (password reset).
    /// The code must still be presented so a stale verification cannot be
    /// replayed by someone who never saw the message.
    pub async fn confirm_verified(&self, mobile: &str, code: &str) -> DomainResult<()> {
        let _guard = self.locks.lock(mobile).await;

        let record = self
            .records
            .find_by_mobile(mobile)
            .await?
            .ok_or(OtpError::NotRequested)?;

        if !record.verified {
            return Err(OtpError::NotVerified.into());
        }
        if !record.matches(code) {
            return Err(OtpError::InvalidCode.into());
        }
        Ok(())
    }

    /// Remove the record for `mobile` once its verification has been consumed
    pub async fn discard(&self, mobile: &str) -> DomainResult<bool> {
        let _guard = self.locks.lock(mobile).await;
        let removed = self.records.delete(mobile).await?;
        tracing::debug!(
            phone = %mask_phone_number(mobile),
            removed = removed,
            event = "otp_record_discarded",
            "OTP record discarded"
        );
        Ok(removed)
    }

    /// Remove the record only if it is still the verified record for `code`
    ///
    /// Returns `false` and leaves the store alone when the record was replaced
    /// by a newer issuance after the verification was confirmed.
    pub async fn discard_verified(&self, mobile: &str, code: &str) -> DomainResult<bool> {
        let _guard = self.locks.lock(mobile).await;

        let still_verified = self
            .records
            .find_by_mobile(mobile)
            .await?
            .map(|record| record.verified && record.matches(code))
            .unwrap_or(false);
        if !still_verified {
            tracing::info!(
                phone = %mask_phone_number(mobile),
                event = "otp_record_kept",
                "OTP record changed since confirmation, not discarding"
            );
            return Ok(false);
        }

        let removed = self.records.delete(mobile).await?;
        tracing::debug!(
            phone = %mask_phone_number(mobile),
            event = "otp_record_discarded",
            "Verified OTP record consumed"
        );
        Ok(removed)
    }

    async fn dispatch(&self, mobile: &str, code: &str) -> DomainResult<String> {
        let destination = to_destination(&self.config.country_code, mobile);
        let timeout = self.config.dispatch_timeout();

        match tokio::time::timeout(timeout, self.gateway.send_code(&destination, code)).await {
            Ok(Ok(message_id)) => Ok(message_id),
            Ok(Err(reason)) => {
                tracing::error!(
                    phone = %mask_phone_number(mobile),
                    provider = self.gateway.provider_name(),
                    error = %reason,
                    event = "otp_delivery_failed",
                    "Messaging gateway rejected the OTP"
                );
                Err(OtpError::DeliveryFailed { reason }.into())
            }
            Err(_) => {
                tracing::error!(
                    phone = %mask_phone_number(mobile),
                    provider = self.gateway.provider_name(),
                    timeout_seconds = timeout.as_secs(),
                    event = "otp_delivery_timeout",
                    "Messaging gateway did not answer in time"
                );
                Err(OtpError::DeliveryFailed {
                    reason: format!("gateway timed out after {}s", timeout.as_secs()),
                }
                .into())
            }
        }
    }

    /// Generate a uniformly random numeric code using the OS CSPRNG
    pub fn generate_secure_code() -> String {
        let upper = 10u32.pow(CODE_LENGTH as u32);
        let code = OsRng.gen_range(0..upper);
        format!("{:0width$}", code, width = CODE_LENGTH)
    }
}
