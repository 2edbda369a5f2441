//! User models.
//!
//! This module re-exports the account types from the `campusbyte-models` crate
//! and adds the role-tagged shapes the provisioning service works with.

pub use campusbyte_models::users::{
    Admin, AdminAccount, AdminProfileDto, CreateAdminRequest, CreateFacultyRequest,
    CreateStudentRequest, Faculty, FacultyAccount, FacultyProfileDto, NewUser, ProfileOwner,
    Student, StudentAccount, StudentProfileDto, User,
};

use campusbyte_models::ids::AcademicDepartmentId;
use campusbyte_models::value_types::UserRole;

/// The profile to create alongside a new user.
#[derive(Debug, Clone)]
pub enum NewProfile {
    Student(StudentProfileDto),
    Faculty(FacultyProfileDto),
    Admin(AdminProfileDto),
}

impl NewProfile {
    pub fn role(&self) -> UserRole {
        match self {
            Self::Student(_) => UserRole::Student,
            Self::Faculty(_) => UserRole::Faculty,
            Self::Admin(_) => UserRole::Admin,
        }
    }

    /// Department the profile belongs to. Admins have none.
    pub fn academic_department_id(&self) -> Option<AcademicDepartmentId> {
        match self {
            Self::Student(dto) => Some(dto.academic_department_id),
            Self::Faculty(dto) => Some(dto.academic_department_id),
            Self::Admin(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ProvisionedProfile {
    Student(Student),
    Faculty(Faculty),
    Admin(Admin),
}

/// A committed user and its profile.
#[derive(Debug, Clone)]
pub struct ProvisionedAccount {
    pub user: User,
    pub profile: ProvisionedProfile,
}
