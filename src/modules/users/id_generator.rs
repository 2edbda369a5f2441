//! Human-readable login ids.
//!
//! | Role    | Format                      | Example      |
//! |---------|-----------------------------|--------------|
//! | Student | year, semester code, `0000` | `2030010001` |
//! | Faculty | `F-0000`                    | `F-0001`     |
//! | Admin   | `A-0000`                    | `A-0001`     |
//!
//! Each scope has its own counter. Students are counted per admission
//! semester, so the first student admitted in Autumn 2030 is `2030010001`.

use campusbyte_core::AppError;
use campusbyte_db::AccountTransaction;
use campusbyte_models::academic::AcademicSemester;
use campusbyte_models::value_types::SemesterCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdScheme {
    Student { year: i32, code: SemesterCode },
    Faculty,
    Admin,
}

impl IdScheme {
    pub fn for_admission(semester: &AcademicSemester) -> Self {
        Self::Student {
            year: semester.year,
            code: semester.code,
        }
    }

    /// Name of the counter this scheme draws from.
    pub fn scope(&self) -> String {
        match self {
            Self::Student { year, code } => format!("{}{}", year, code),
            Self::Faculty => "F".to_string(),
            Self::Admin => "A".to_string(),
        }
    }

    pub fn format(&self, sequence: i64) -> String {
        match self {
            Self::Student { .. } => format!("{}{:04}", self.scope(), sequence),
            Self::Faculty | Self::Admin => format!("{}-{:04}", self.scope(), sequence),
        }
    }
}

/// Draws the next id for `scheme` inside the provisioning transaction.
///
/// Rolling back the transaction also rolls back the counter.
pub async fn generate_login_id(
    tx: &mut dyn AccountTransaction,
    scheme: IdScheme,
) -> Result<String, AppError> {
    let sequence = tx.next_login_sequence(&scheme.scope()).await?;
    Ok(scheme.format(sequence))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_ids_carry_year_and_code() {
        let scheme = IdScheme::Student {
            year: 2030,
            code: SemesterCode::First,
        };
        assert_eq!(scheme.scope(), "203001");
        assert_eq!(scheme.format(1), "2030010001");
        assert_eq!(scheme.format(123), "2030010123");
    }

    #[test]
    fn test_faculty_and_admin_ids_are_prefixed() {
        assert_eq!(IdScheme::Faculty.format(1), "F-0001");
        assert_eq!(IdScheme::Admin.format(42), "A-0042");
    }

    #[test]
    fn test_sequence_wider_than_four_digits_is_kept() {
        assert_eq!(IdScheme::Faculty.format(12345), "F-12345");
    }
}
