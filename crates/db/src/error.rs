use portfolio_core::error::CoreError;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store cannot be reached (simulated outage or closed pool).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A domain-level error, e.g. a rejected contact submission.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Whether the error indicates the store could not be reached, as
    /// opposed to a query that reached it and failed.
    pub fn is_connectivity(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(err) => matches!(
                err,
                sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::WorkerCrashed
            ),
            StoreError::Core(_) => false,
        }
    }
}
