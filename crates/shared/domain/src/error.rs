//! Domain-level errors.
//!
//! These errors describe malformed call arguments. They are raised before
//! any driver call is made.

use thiserror::Error;

/// Domain-specific errors for argument validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Check that a database or collection name is usable.
pub fn validate_namespace(database: &str, collection: &str) -> DomainResult<()> {
    if database.is_empty() {
        return Err(DomainError::validation("Database name must not be empty"));
    }
    if collection.is_empty() {
        return Err(DomainError::validation("Collection name must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_namespace() {
        assert!(validate_namespace("app", "users").is_ok());
        assert_eq!(
            validate_namespace("", "users"),
            Err(DomainError::validation("Database name must not be empty"))
        );
        assert_eq!(
            validate_namespace("app", ""),
            Err(DomainError::validation("Collection name must not be empty"))
        );
    }
}
