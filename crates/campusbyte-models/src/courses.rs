//! Course catalog and the course-faculty eligibility mapping.

use crate::ids::{CourseId, FacultyId};
use campusbyte_core::PaginationMeta;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    /// Unique course title
    pub title: String,
    /// Subject prefix, e.g. "CSE"
    pub prefix: String,
    /// Catalog number, e.g. 101
    pub code: i32,
    pub credits: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 10))]
    pub prefix: String,
    #[validate(range(min = 1))]
    pub code: i32,
    #[validate(range(min = 1, max = 12))]
    pub credits: i32,
}

/// Partial course update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub prefix: Option<String>,
    #[validate(range(min = 1))]
    pub code: Option<i32>,
    #[validate(range(min = 1, max = 12))]
    pub credits: Option<i32>,
}

/// One row of the eligibility mapping: `faculty_id` may teach `course_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, FromRow, ToSchema)]
pub struct CourseFacultyLink {
    pub course_id: CourseId,
    pub faculty_id: FacultyId,
}

/// Faculty members to add to or remove from a course's eligibility list.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AssignCourseFacultiesDto {
    #[validate(length(min = 1, message = "At least one faculty is required"))]
    pub faculties: Vec<FacultyId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseFacultiesResponse {
    pub course_id: CourseId,
    pub faculties: Vec<FacultyId>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedCoursesResponse {
    pub data: Vec<Course>,
    pub meta: PaginationMeta,
}
