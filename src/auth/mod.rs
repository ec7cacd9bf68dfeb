// Auth collaborator: one operation, login(code) -> bool, which may also fail
// outright. The tenant login screen only ever sees this contract.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    BadResponse(String),
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Verify an authentication code. Ok(true) means the code belongs to a
    /// registered system; Ok(false) means it does not. Err is the "thrown"
    /// failure path.
    async fn login(&self, code: &str) -> Result<bool, AuthError>;
}

/// Auth provider backed by the systems table
pub struct PgAuthProvider {
    pool: PgPool,
}

impl PgAuthProvider {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthProvider for PgAuthProvider {
    async fn login(&self, code: &str) -> Result<bool, AuthError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM systems WHERE auth_code = $1")
            .bind(code)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0 > 0)
    }
}
