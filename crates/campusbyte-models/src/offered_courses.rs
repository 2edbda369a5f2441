//! Course offerings: a course taught by one faculty member in one section of a
//! semester registration, on a weekly schedule.

use std::borrow::Cow;

use crate::ids::{
    AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, CourseId, FacultyId,
    OfferedCourseId, SemesterRegistrationId,
};
use crate::value_types::{ClockTime, Day};
use campusbyte_core::serde::deserialize_optional_from_str;
use campusbyte_core::{AppError, PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Sorts days into week order and drops repeats.
pub fn normalize_days(mut days: Vec<Day>) -> Vec<Day> {
    days.sort_unstable();
    days.dedup();
    days
}

/// A weekly time window: a set of days plus a start and end time.
///
/// Days are kept sorted and unique, so two schedules with the same day set
/// compare equal regardless of the order the days were supplied in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Schedule {
    pub days: Vec<Day>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
}

impl Schedule {
    /// Builds a schedule, rejecting an empty day set or a window that does not
    /// end after it starts.
    pub fn new(days: Vec<Day>, start_time: ClockTime, end_time: ClockTime) -> Result<Self, AppError> {
        let days = normalize_days(days);
        if days.is_empty() {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "At least one day is required"
            )));
        }
        if start_time >= end_time {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Start time should be before end time"
            )));
        }
        Ok(Self {
            days,
            start_time,
            end_time,
        })
    }

    pub fn shares_day_with(&self, other: &Schedule) -> bool {
        self.days.iter().any(|day| other.days.contains(day))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct OfferedCourse {
    pub id: OfferedCourseId,
    pub semester_registration_id: SemesterRegistrationId,
    /// Copied from the semester registration, never taken from the request
    pub academic_semester_id: AcademicSemesterId,
    pub academic_faculty_id: AcademicFacultyId,
    pub academic_department_id: AcademicDepartmentId,
    pub course_id: CourseId,
    /// Instructor teaching this offering
    pub faculty_id: FacultyId,
    pub section: String,
    pub max_capacity: i32,
    pub days: Vec<Day>,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OfferedCourse {
    pub fn schedule(&self) -> Schedule {
        Schedule {
            days: normalize_days(self.days.clone()),
            start_time: self.start_time,
            end_time: self.end_time,
        }
    }
}

fn check_times(start: Option<ClockTime>, end: Option<ClockTime>) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        return Err(ValidationError::new("time_window")
            .with_message(Cow::Borrowed("Start time should be before end time")));
    }
    Ok(())
}

fn validate_create_times(dto: &CreateOfferedCourseDto) -> Result<(), ValidationError> {
    check_times(Some(dto.start_time), Some(dto.end_time))
}

fn validate_update_times(dto: &UpdateOfferedCourseDto) -> Result<(), ValidationError> {
    check_times(dto.start_time, dto.end_time)
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_times"))]
pub struct CreateOfferedCourseDto {
    pub semester_registration_id: SemesterRegistrationId,
    pub academic_faculty_id: AcademicFacultyId,
    pub academic_department_id: AcademicDepartmentId,
    pub course_id: CourseId,
    pub faculty_id: FacultyId,
    #[validate(length(min = 1, max = 20))]
    pub section: String,
    #[validate(range(min = 1))]
    pub max_capacity: i32,
    #[validate(length(min = 1, message = "At least one day is required"))]
    pub days: Vec<Day>,
    /// 24-hour "HH:MM"
    pub start_time: ClockTime,
    /// 24-hour "HH:MM", after `start_time`
    pub end_time: ClockTime,
}

impl CreateOfferedCourseDto {
    pub fn schedule(&self) -> Result<Schedule, AppError> {
        Schedule::new(self.days.clone(), self.start_time, self.end_time)
    }
}

/// A fully validated offering ready to be stored.
#[derive(Debug, Clone)]
pub struct NewOfferedCourse {
    pub semester_registration_id: SemesterRegistrationId,
    pub academic_semester_id: AcademicSemesterId,
    pub academic_faculty_id: AcademicFacultyId,
    pub academic_department_id: AcademicDepartmentId,
    pub course_id: CourseId,
    pub faculty_id: FacultyId,
    pub section: String,
    pub max_capacity: i32,
    pub schedule: Schedule,
}

/// Partial update of an offering. Only the instructor, capacity and schedule may change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_times"))]
pub struct UpdateOfferedCourseDto {
    pub faculty_id: Option<FacultyId>,
    #[validate(range(min = 1))]
    pub max_capacity: Option<i32>,
    #[validate(length(min = 1, message = "At least one day is required"))]
    pub days: Option<Vec<Day>>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

/// Values written by an update. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferedCoursePatch {
    pub faculty_id: Option<FacultyId>,
    pub max_capacity: Option<i32>,
    pub days: Option<Vec<Day>>,
    pub start_time: Option<ClockTime>,
    pub end_time: Option<ClockTime>,
}

impl From<UpdateOfferedCourseDto> for OfferedCoursePatch {
    fn from(dto: UpdateOfferedCourseDto) -> Self {
        Self {
            faculty_id: dto.faculty_id,
            max_capacity: dto.max_capacity,
            days: dto.days.map(normalize_days),
            start_time: dto.start_time,
            end_time: dto.end_time,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OfferedCourseFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub semester_registration_id: Option<SemesterRegistrationId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub faculty_id: Option<FacultyId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub course_id: Option<CourseId>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub academic_department_id: Option<AcademicDepartmentId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedOfferedCoursesResponse {
    pub data: Vec<OfferedCourse>,
    pub meta: PaginationMeta,
}
