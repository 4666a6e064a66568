//! MySQL implementation of the OtpRecordRepository trait.
//!
//! Records live in the `otp_records` table keyed by mobile number (see
//! `infra/sql/otp_records.sql`). Writes are a single
//! `INSERT ... ON DUPLICATE KEY UPDATE`, so the row for a number is always
//! replaced atomically.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use co_core::domain::entities::otp_record::OtpRecord;
use co_core::errors::DomainError;
use co_core::repositories::OtpRecordRepository;
use co_shared::utils::phone::mask_phone_number;

/// MySQL implementation of OtpRecordRepository
pub struct MySqlOtpRecordRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlOtpRecordRepository {
    /// Create a new MySQL OTP record repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to OtpRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<OtpRecord, DomainError> {
        let column_error = |column: &str, e: sqlx::Error| DomainError::Internal {
            message: format!("Failed to get {}: {}", column, e),
        };

        Ok(OtpRecord {
            mobile: row
                .try_get("mobile")
                .map_err(|e| column_error("mobile", e))?,
            code: row.try_get("code").map_err(|e| column_error("code", e))?,
            attempts: row
                .try_get::<u32, _>("attempts")
                .map_err(|e| column_error("attempts", e))?,
            first_attempt_at: row
                .try_get::<DateTime<Utc>, _>("first_attempt_at")
                .map_err(|e| column_error("first_attempt_at", e))?,
            last_sent_at: row
                .try_get::<DateTime<Utc>, _>("last_sent_at")
                .map_err(|e| column_error("last_sent_at", e))?,
            verified: row
                .try_get("verified")
                .map_err(|e| column_error("verified", e))?,
        })
    }
}

#[async_trait]
impl OtpRecordRepository for MySqlOtpRecordRepository {
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<OtpRecord>, DomainError> {
        let query = r#"
            SELECT mobile, code, attempts, first_attempt_at, last_sent_at, verified
            FROM otp_records
            WHERE mobile = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find OTP record: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, record: &OtpRecord) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO otp_records (
                mobile, code, attempts, first_attempt_at, last_sent_at, verified
            ) VALUES (?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                attempts = VALUES(attempts),
                first_attempt_at = VALUES(first_attempt_at),
                last_sent_at = VALUES(last_sent_at),
                verified = VALUES(verified)
        "#;

        sqlx::query(query)
            .bind(&record.mobile)
            .bind(&record.code)
            .bind(record.attempts)
            .bind(record.first_attempt_at)
            .bind(record.last_sent_at)
            .bind(record.verified)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&record.mobile),
                    error = %e,
                    "Failed to store OTP record"
                );
                DomainError::Internal {
                    message: format!("Failed to store OTP record: {}", e),
                }
            })?;

        Ok(())
    }

    async fn delete(&self, mobile: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM otp_records WHERE mobile = ?")
            .bind(mobile)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete OTP record: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
