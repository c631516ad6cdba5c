//! Storage errors for cura-db.
//!
//! Domain rule violations travel inside [`DatabaseError::Core`] so the HTTP
//! layer can map them to 4xx statuses; every other variant is a 500.

use cura_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A row could not be decoded into an entity.
    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    /// A lookup that must return a row returned none.
    #[error("No result returned")]
    NoResult,

    /// A stored value is outside what the schema allows.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Not found, validation, messaging gate, or duplicate pair.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Map a UNIQUE violation from `err` to [`CoreError::Conflict`] with `message`.
    pub(crate) fn conflict_on_unique(err: libsql::Error, message: &str) -> Self {
        if err.to_string().contains("UNIQUE constraint failed") {
            Self::Core(CoreError::Conflict(message.to_string()))
        } else {
            Self::LibSql(err)
        }
    }
}
