use campusbyte_core::{AppError, ErrorKind};
use campusbyte_db::RepositoryError;

/// Reports a unique-constraint rejection as `kind` with `message`.
///
/// Any other store failure stays internal.
pub fn unique_violation_as(err: RepositoryError, kind: ErrorKind, message: &'static str) -> AppError {
    match err.unique_constraint() {
        Some(constraint) => {
            tracing::debug!(constraint, "Write rejected by unique constraint");
            AppError::new(kind, anyhow::Error::msg(message))
        }
        None => AppError::database(err),
    }
}

/// Reports a write blocked by a foreign key as `kind` with `message`.
///
/// Any other store failure stays internal.
pub fn foreign_key_violation_as(
    err: RepositoryError,
    kind: ErrorKind,
    message: &'static str,
) -> AppError {
    match err.foreign_key_constraint() {
        Some(constraint) => {
            tracing::debug!(constraint, "Write rejected by foreign key");
            AppError::new(kind, anyhow::Error::msg(message))
        }
        None => AppError::database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_takes_given_kind() {
        let err = RepositoryError::UniqueViolation("unique_course_title".into());
        let mapped = unique_violation_as(err, ErrorKind::Conflict, "Course already exists");
        assert_eq!(mapped.kind, ErrorKind::Conflict);
        assert_eq!(mapped.message(), "Course already exists");
    }

    #[test]
    fn test_other_failures_stay_internal() {
        let err = RepositoryError::Internal("boom".into());
        let mapped = unique_violation_as(err, ErrorKind::Conflict, "Course already exists");
        assert_eq!(mapped.kind, ErrorKind::Internal);
    }

    #[test]
    fn test_foreign_key_violation_takes_given_kind() {
        let err = RepositoryError::ForeignKeyViolation("offered_courses_course_id_fkey".into());
        let mapped = foreign_key_violation_as(err, ErrorKind::Conflict, "Course is in use");
        assert_eq!(mapped.kind, ErrorKind::Conflict);

        let unique = RepositoryError::UniqueViolation("unique_course_title".into());
        let mapped = foreign_key_violation_as(unique, ErrorKind::Conflict, "Course is in use");
        assert_eq!(mapped.kind, ErrorKind::Internal);
    }
}
