//! Typed error type for the db crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("row not found")]
    NotFound,

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A persisted value (JSON payload, enum text) failed to decode back
    /// into its domain type.
    #[error("corrupt persisted value: {0}")]
    Corrupt(String),
}
