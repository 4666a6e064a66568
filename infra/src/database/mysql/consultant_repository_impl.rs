//! MySQL implementation of the ConsultantRepository trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::MySqlPool;

use co_core::errors::DomainError;
use co_core::repositories::ConsultantRepository;

/// MySQL implementation of ConsultantRepository over the `consultants` table
pub struct MySqlConsultantRepository {
    pool: MySqlPool,
}

impl MySqlConsultantRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ConsultantRepository for MySqlConsultantRepository {
    async fn exists_by_mobile(&self, mobile: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT 1 FROM consultants WHERE mobile = ? LIMIT 1")
            .bind(mobile)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to look up consultant: {}", e),
            })?;

        Ok(row.is_some())
    }

    async fn update_password_hash(
        &self,
        mobile: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE consultants
            SET password_hash = ?, updated_at = ?
            WHERE mobile = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(mobile)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update password: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}
