//! Academic structure: semesters, academic faculties and their departments.

use crate::ids::{AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId};
use crate::value_types::{Month, SemesterCode, SemesterName};
use campusbyte_core::serde::deserialize_optional_from_str;
use campusbyte_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// A semester of a given academic year, e.g. "Autumn 2030".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicSemester {
    pub id: AcademicSemesterId,
    pub name: SemesterName,
    /// Two-digit code, fixed by the semester name
    pub code: SemesterCode,
    /// Four-digit academic year
    pub year: i32,
    pub start_month: Month,
    pub end_month: Month,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicSemesterDto {
    pub name: SemesterName,
    /// Must match the name: Autumn is 01, Summer is 02, Fall is 03
    pub code: SemesterCode,
    #[validate(range(min = 1000, max = 9999))]
    pub year: i32,
    pub start_month: Month,
    pub end_month: Month,
}

/// An academic faculty, e.g. "Faculty of Engineering".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicFaculty {
    pub id: AcademicFacultyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicFacultyDto {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
}

/// A department owned by exactly one academic faculty.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AcademicDepartment {
    pub id: AcademicDepartmentId,
    pub name: String,
    pub academic_faculty_id: AcademicFacultyId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAcademicDepartmentDto {
    #[validate(length(min = 1, max = 150))]
    pub name: String,
    pub academic_faculty_id: AcademicFacultyId,
}

/// Query parameters for listing departments.
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AcademicDepartmentFilterParams {
    /// Only departments of this academic faculty
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub academic_faculty_id: Option<AcademicFacultyId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedAcademicSemestersResponse {
    pub data: Vec<AcademicSemester>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedAcademicFacultiesResponse {
    pub data: Vec<AcademicFaculty>,
    pub meta: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedAcademicDepartmentsResponse {
    pub data: Vec<AcademicDepartment>,
    pub meta: PaginationMeta,
}
