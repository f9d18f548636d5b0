use thiserror::Error;

/// Store operation error.
///
/// These are **infrastructure** failures (connectivity, query execution,
/// uniqueness conflicts), as opposed to domain errors (validation,
/// invariants). Callers treat `Unavailable` and `Query` as retryable; the
/// services in this crate never retry on their own.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// A query failed to execute or decode.
    #[error("query failed: {0}")]
    Query(String),

    /// A uniqueness constraint was violated (e.g. one shop per user).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}
