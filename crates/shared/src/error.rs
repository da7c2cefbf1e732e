//! Error types for Uproom

use thiserror::Error;

/// Errors raised by a tenant record store lookup
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store answered but the query failed
    #[error("Database error: {0}")]
    Database(String),

    /// The store could not be reached (pool exhausted, closed, network fault)
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether retrying later might succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}
