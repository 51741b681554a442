use sea_orm::{DbErr, SqlErr};

use blogly_core::error::RepoError;

/// Classify a SeaORM error into the port-level error kinds.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            return RepoError::Constraint(format!("unique constraint: {detail}"));
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            return RepoError::Constraint(format!("foreign key constraint: {detail}"));
        }
        _ => {}
    }

    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_update_is_not_found() {
        assert!(matches!(
            map_db_err(DbErr::RecordNotUpdated),
            RepoError::NotFound
        ));
    }

    #[test]
    fn test_other_errors_are_query_failures() {
        assert!(matches!(
            map_db_err(DbErr::Custom("boom".into())),
            RepoError::Query(msg) if msg.contains("boom")
        ));
    }
}
