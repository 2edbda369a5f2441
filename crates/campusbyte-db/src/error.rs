//! Error types for store operations.

/// Result type for store operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// A unique constraint rejected the write. Carries the constraint name.
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The write would leave a dangling reference. Carries the constraint name.
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Name of the violated unique constraint, if this is a uniqueness failure.
    pub fn unique_constraint(&self) -> Option<&str> {
        match self {
            Self::UniqueViolation(constraint) => Some(constraint),
            _ => None,
        }
    }

    /// Name of the violated foreign key constraint, if a reference blocked the write.
    pub fn foreign_key_constraint(&self) -> Option<&str> {
        match self {
            Self::ForeignKeyViolation(constraint) => Some(constraint),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return Self::UniqueViolation(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKeyViolation(constraint);
            }
        }
        Self::Database(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_kept() {
        let err: RepositoryError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
        assert!(err.unique_constraint().is_none());
    }

    #[test]
    fn test_unique_constraint_name() {
        let err = RepositoryError::UniqueViolation("unique_offered_course_section".into());
        assert_eq!(err.unique_constraint(), Some("unique_offered_course_section"));
        assert!(err.foreign_key_constraint().is_none());
    }

    #[test]
    fn test_foreign_key_constraint_name() {
        let err = RepositoryError::ForeignKeyViolation("offered_courses_course_id_fkey".into());
        assert_eq!(err.foreign_key_constraint(), Some("offered_courses_course_id_fkey"));
        assert!(err.unique_constraint().is_none());
    }
}
