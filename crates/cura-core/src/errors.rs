//! Cross-cutting error types for CuraLink.
//!
//! These errors describe domain rule violations that any layer can raise.
//! Storage failures live in `cura-db` (`DatabaseError`) and HTTP mapping lives
//! in `cura-server` (`ApiError`).

use thiserror::Error;

/// Domain errors raised by any CuraLink crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// A required field is missing or a value is out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operation is not permitted in the entity's current state.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The operation would violate a uniqueness rule.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A status transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for [`CoreError::NotFound`].
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
    }

    /// Shorthand for [`CoreError::Validation`] on a missing field.
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("{field} is required"))
    }
}
