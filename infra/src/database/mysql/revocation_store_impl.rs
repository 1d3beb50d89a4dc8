//! MySQL implementation of the RevocationStore trait.
//!
//! Revoked token IDs live in `revoked_tokens`. The primary key on `jti` is
//! what makes `try_revoke` a conditional write shared by every service
//! instance pointed at the same database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::MySqlPool;
use tracing::{debug, error};

use tg_core::errors::StoreError;
use tg_core::repositories::RevocationStore;

/// DDL for the revocation table
pub const CREATE_REVOKED_TOKENS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS revoked_tokens (
        jti VARCHAR(64) NOT NULL PRIMARY KEY,
        expires_at DATETIME(6) NOT NULL,
        revoked_at DATETIME(6) NOT NULL,
        INDEX idx_revoked_tokens_expires_at (expires_at)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// MySQL implementation of RevocationStore
pub struct MySqlRevocationStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlRevocationStore {
    /// Create a new MySQL revocation store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Create the `revoked_tokens` table if it does not exist
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_REVOKED_TOKENS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to create revoked_tokens table: {}", e);
                StoreError::backend(format!("Failed to create revoked_tokens table: {}", e))
            })?;
        Ok(())
    }
}

/// Whether an insert failed because the row already exists
fn is_duplicate_entry(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

#[async_trait]
impl RevocationStore for MySqlRevocationStore {
    async fn try_revoke(&self, unique_id: &str, expires_at: DateTime<Utc>) -> Result<bool, StoreError> {
        let query = r#"
            INSERT INTO revoked_tokens (jti, expires_at, revoked_at)
            VALUES (?, ?, ?)
        "#;

        let result = sqlx::query(query)
            .bind(unique_id)
            .bind(expires_at)
            .bind(Utc::now())
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_entry(&e) => {
                debug!(jti = %unique_id, "Token already present in revoked_tokens");
                Ok(false)
            }
            Err(e) => Err(StoreError::backend(format!("Failed to revoke token: {}", e))),
        }
    }

    async fn is_revoked(&self, unique_id: &str) -> Result<bool, StoreError> {
        let query = "SELECT 1 FROM revoked_tokens WHERE jti = ? LIMIT 1";

        let row: Option<i64> = sqlx::query_scalar(query)
            .bind(unique_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to check revocation: {}", e)))?;

        Ok(row.is_some())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<usize, StoreError> {
        let query = "DELETE FROM revoked_tokens WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::backend(format!("Failed to purge revoked tokens: {}", e)))?;

        Ok(result.rows_affected() as usize)
    }
}
