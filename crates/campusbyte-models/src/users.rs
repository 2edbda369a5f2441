//! Login identities and the per-role profiles.
//!
//! Every [`User`] owns exactly one profile of its role: a [`Student`],
//! [`Faculty`] or [`Admin`]. The profile keeps a back-reference to the user
//! and a copy of its generated login id.

use std::borrow::Cow;

use crate::ids::{
    AcademicDepartmentId, AcademicSemesterId, AdminId, FacultyId, StudentId, UserId,
};
use crate::value_types::{BloodGroup, Gender, UserRole, UserStatus};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Accepts 10 to 15 digits, nothing else.
fn validate_contact_no(value: &str) -> Result<(), ValidationError> {
    let digits = value.len();
    if (10..=15).contains(&digits) && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("contact_no")
            .with_message(Cow::Borrowed("Must be a valid contact number")))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: UserId,
    /// Generated human-readable id, e.g. `2030010001`, `F-0001`, `A-0001`
    pub login_id: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Set when the account was created with the default password
    pub needs_password_change: bool,
    pub role: UserRole,
    pub status: UserStatus,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub login_id: String,
    pub password_hash: String,
    pub needs_password_change: bool,
    pub role: UserRole,
}

/// The user a profile is being created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileOwner {
    pub user_id: UserId,
    pub login_id: String,
}

impl From<&User> for ProfileOwner {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            login_id: user.login_id.clone(),
        }
    }
}

/// A student's parents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct Guardian {
    #[validate(length(min = 1, max = 100))]
    pub father_name: String,
    #[validate(length(min = 1, max = 100))]
    pub father_occupation: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub father_contact_no: String,
    #[validate(length(min = 1, max = 100))]
    pub mother_name: String,
    #[validate(length(min = 1, max = 100))]
    pub mother_occupation: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub mother_contact_no: String,
}

/// Guardian living near campus. Stored with a `local_guardian_` column prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, Validate, ToSchema)]
pub struct LocalGuardian {
    #[sqlx(rename = "local_guardian_name")]
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[sqlx(rename = "local_guardian_occupation")]
    #[validate(length(min = 1, max = 100))]
    pub occupation: String,
    #[sqlx(rename = "local_guardian_contact_no")]
    #[validate(custom(function = "validate_contact_no"))]
    pub contact_no: String,
    #[sqlx(rename = "local_guardian_address")]
    #[validate(length(min = 5))]
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Student {
    pub id: StudentId,
    pub login_id: String,
    pub user_id: UserId,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub present_address: String,
    pub permanent_address: String,
    #[sqlx(flatten)]
    pub guardian: Guardian,
    #[sqlx(flatten)]
    pub local_guardian: LocalGuardian,
    pub blood_group: Option<BloodGroup>,
    pub profile_img: Option<String>,
    pub admission_semester_id: AcademicSemesterId,
    pub academic_department_id: AcademicDepartmentId,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Faculty {
    pub id: FacultyId,
    pub login_id: String,
    pub user_id: UserId,
    pub designation: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub present_address: String,
    pub permanent_address: String,
    pub academic_department_id: AcademicDepartmentId,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Admin {
    pub id: AdminId,
    pub login_id: String,
    pub user_id: UserId,
    pub designation: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub contact_no: String,
    pub emergency_contact_no: String,
    pub present_address: String,
    pub permanent_address: String,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct StudentProfileDto {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub contact_no: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub emergency_contact_no: String,
    #[validate(length(min = 5))]
    pub present_address: String,
    #[validate(length(min = 5))]
    pub permanent_address: String,
    #[validate(nested)]
    pub guardian: Guardian,
    #[validate(nested)]
    pub local_guardian: LocalGuardian,
    pub blood_group: Option<BloodGroup>,
    /// Link to the profile picture
    #[validate(length(min = 1, max = 500))]
    pub profile_img: Option<String>,
    /// Semester of admission, drives the generated login id
    pub admission_semester_id: AcademicSemesterId,
    pub academic_department_id: AcademicDepartmentId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct FacultyProfileDto {
    #[validate(length(min = 1, max = 100))]
    pub designation: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub contact_no: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub emergency_contact_no: String,
    #[validate(length(min = 5))]
    pub present_address: String,
    #[validate(length(min = 5))]
    pub permanent_address: String,
    pub academic_department_id: AcademicDepartmentId,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AdminProfileDto {
    #[validate(length(min = 1, max = 100))]
    pub designation: String,
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(max = 50))]
    pub middle_name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    pub gender: Gender,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub contact_no: String,
    #[validate(custom(function = "validate_contact_no"))]
    pub emergency_contact_no: String,
    #[validate(length(min = 5))]
    pub present_address: String,
    #[validate(length(min = 5))]
    pub permanent_address: String,
}

/// Body of `POST /api/users/create-student`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateStudentRequest {
    /// Falls back to the configured default password when absent or empty
    #[validate(length(max = 64))]
    pub password: Option<String>,
    #[validate(nested)]
    pub student: StudentProfileDto,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateFacultyRequest {
    #[validate(length(max = 64))]
    pub password: Option<String>,
    #[validate(nested)]
    pub faculty: FacultyProfileDto,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAdminRequest {
    #[validate(length(max = 64))]
    pub password: Option<String>,
    #[validate(nested)]
    pub admin: AdminProfileDto,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StudentAccount {
    pub user: User,
    pub student: Student,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FacultyAccount {
    pub user: User,
    pub faculty: Faculty,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminAccount {
    pub user: User,
    pub admin: Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_dto() -> AdminProfileDto {
        AdminProfileDto {
            designation: "Registrar".into(),
            first_name: "Ada".into(),
            middle_name: None,
            last_name: "Lovelace".into(),
            gender: Gender::Female,
            date_of_birth: None,
            email: "ada@campus.test".into(),
            contact_no: "01711111111".into(),
            emergency_contact_no: "01722222222".into(),
            present_address: "12 Main Road".into(),
            permanent_address: "12 Main Road".into(),
        }
    }

    #[test]
    fn test_contact_no_rule() {
        assert!(validate_contact_no("0171111111").is_ok());
        assert!(validate_contact_no("017111").is_err());
        assert!(validate_contact_no("+8801711111111").is_err());
        assert!(validate_contact_no("0171111111111111").is_err());
    }

    #[test]
    fn test_admin_dto_validation() {
        assert!(admin_dto().validate().is_ok());

        let bad_email = AdminProfileDto {
            email: "not-an-email".into(),
            ..admin_dto()
        };
        assert!(bad_email.validate().is_err());

        let short_address = AdminProfileDto {
            present_address: "x".into(),
            ..admin_dto()
        };
        assert!(short_address.validate().is_err());
    }

    #[test]
    fn test_request_validates_nested_profile() {
        let request = CreateAdminRequest {
            password: None,
            admin: AdminProfileDto {
                contact_no: "abc".into(),
                ..admin_dto()
            },
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_student_dto_validates_guardians() {
        let json = serde_json::json!({
            "first_name": "Alan",
            "last_name": "Turing",
            "gender": "male",
            "email": "alan@campus.test",
            "contact_no": "01733333333",
            "emergency_contact_no": "01744444444",
            "present_address": "7 Dorm Street",
            "permanent_address": "7 Dorm Street",
            "guardian": {
                "father_name": "Julius",
                "father_occupation": "Civil servant",
                "father_contact_no": "01755555555",
                "mother_name": "Ethel",
                "mother_occupation": "Artist",
                "mother_contact_no": "01766666666"
            },
            "local_guardian": {
                "name": "Sara",
                "occupation": "Teacher",
                "contact_no": "01777777777",
                "address": "3 Harbour Road"
            },
            "blood_group": "B+",
            "admission_semester_id": AcademicSemesterId::from_u128(1),
            "academic_department_id": AcademicDepartmentId::from_u128(2)
        });
        let dto: StudentProfileDto = serde_json::from_value(json).unwrap();
        assert_eq!(dto.blood_group, Some(BloodGroup::BPositive));
        assert!(dto.profile_img.is_none());
        assert!(dto.validate().is_ok());

        let bad_local = StudentProfileDto {
            local_guardian: LocalGuardian {
                contact_no: "n/a".into(),
                ..dto.local_guardian.clone()
            },
            ..dto.clone()
        };
        assert!(bad_local.validate().is_err());

        let nameless_father = StudentProfileDto {
            guardian: Guardian {
                father_name: String::new(),
                ..dto.guardian.clone()
            },
            ..dto
        };
        assert!(nameless_father.validate().is_err());
    }

    #[test]
    fn test_user_serialization_hides_password() {
        let user = User {
            id: UserId::new(),
            login_id: "A-0001".into(),
            password_hash: "$2b$04$secret".into(),
            needs_password_change: true,
            role: UserRole::Admin,
            status: UserStatus::InProgress,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "admin");
        assert_eq!(json["status"], "in-progress");
    }

    #[test]
    fn test_profile_owner_from_user() {
        let user = User {
            id: UserId::from_u128(7),
            login_id: "F-0003".into(),
            password_hash: String::new(),
            needs_password_change: false,
            role: UserRole::Faculty,
            status: UserStatus::InProgress,
            is_deleted: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let owner = ProfileOwner::from(&user);
        assert_eq!(owner.user_id, UserId::from_u128(7));
        assert_eq!(owner.login_id, "F-0003");
    }
}
