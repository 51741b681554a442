//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: i32 },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn not_found(entity_type: &'static str, id: i32) -> Self {
        Self::NotFound { entity_type, id }
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl RepoError {
    /// Attach the entity being operated on, turning a bare `NotFound` into a
    /// domain error that names what was missing.
    pub fn for_entity(self, entity_type: &'static str, id: i32) -> DomainError {
        match self {
            RepoError::NotFound => DomainError::not_found(entity_type, id),
            other => other.into(),
        }
    }
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Constraint(msg) => DomainError::Constraint(msg),
            RepoError::NotFound => DomainError::Internal("record vanished".to_string()),
            RepoError::Connection(msg) => DomainError::Internal(format!("connection: {msg}")),
            RepoError::Query(msg) => DomainError::Internal(format!("query: {msg}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_entity_names_missing_record() {
        let err = RepoError::NotFound.for_entity("Post", 7);
        assert!(matches!(
            err,
            DomainError::NotFound {
                entity_type: "Post",
                id: 7
            }
        ));
        assert_eq!(err.to_string(), "Entity not found: Post with id 7");
    }

    #[test]
    fn test_constraint_survives_conversion() {
        let err = RepoError::Constraint("tags_name_key".into()).for_entity("Tag", 1);
        assert!(matches!(err, DomainError::Constraint(msg) if msg == "tags_name_key"));
    }
}
