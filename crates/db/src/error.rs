/// Errors raised by [`crate::store`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A non-rejected submission already holds the Aadhaar or PAN.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Map a Postgres unique violation on a `uq_*` index to [`StoreError::Conflict`].
pub(crate) fn classify_unique_violation(err: sqlx::Error, message: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint().is_some_and(|c| c.starts_with("uq_"))
        {
            return StoreError::Conflict(message.to_string());
        }
    }
    StoreError::Database(err)
}
