//! Semester registration periods.
//!
//! A registration's [`RegistrationStatus`] gates what may happen to the course
//! offerings that belong to it.

use std::borrow::Cow;

use crate::ids::{AcademicSemesterId, SemesterRegistrationId};
use crate::value_types::RegistrationStatus;
use campusbyte_core::serde::deserialize_optional_from_str;
use campusbyte_core::{PaginationMeta, PaginationParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

pub const DEFAULT_MIN_CREDIT: i32 = 3;
pub const DEFAULT_MAX_CREDIT: i32 = 15;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct SemesterRegistration {
    pub id: SemesterRegistrationId,
    pub academic_semester_id: AcademicSemesterId,
    pub status: RegistrationStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_credit: i32,
    pub max_credit: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn check_window(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    min_credit: Option<i32>,
    max_credit: Option<i32>,
) -> Result<(), ValidationError> {
    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        return Err(ValidationError::new("registration_window")
            .with_message(Cow::Borrowed("start_date must be before end_date")));
    }
    if let (Some(min), Some(max)) = (min_credit, max_credit)
        && min > max
    {
        return Err(ValidationError::new("credit_range")
            .with_message(Cow::Borrowed("min_credit cannot exceed max_credit")));
    }
    Ok(())
}

fn validate_create_window(dto: &CreateSemesterRegistrationDto) -> Result<(), ValidationError> {
    check_window(
        Some(dto.start_date),
        Some(dto.end_date),
        Some(dto.min_credit.unwrap_or(DEFAULT_MIN_CREDIT)),
        Some(dto.max_credit.unwrap_or(DEFAULT_MAX_CREDIT)),
    )
}

fn validate_update_window(dto: &UpdateSemesterRegistrationDto) -> Result<(), ValidationError> {
    check_window(dto.start_date, dto.end_date, dto.min_credit, dto.max_credit)
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_create_window"))]
pub struct CreateSemesterRegistrationDto {
    pub academic_semester_id: AcademicSemesterId,
    /// Defaults to UPCOMING
    pub status: Option<RegistrationStatus>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Defaults to 3
    #[validate(range(min = 0))]
    pub min_credit: Option<i32>,
    /// Defaults to 15
    #[validate(range(min = 1))]
    pub max_credit: Option<i32>,
}

/// A registration ready to be stored, with defaults resolved.
#[derive(Debug, Clone)]
pub struct NewSemesterRegistration {
    pub academic_semester_id: AcademicSemesterId,
    pub status: RegistrationStatus,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub min_credit: i32,
    pub max_credit: i32,
}

impl From<CreateSemesterRegistrationDto> for NewSemesterRegistration {
    fn from(dto: CreateSemesterRegistrationDto) -> Self {
        Self {
            academic_semester_id: dto.academic_semester_id,
            status: dto.status.unwrap_or(RegistrationStatus::Upcoming),
            start_date: dto.start_date,
            end_date: dto.end_date,
            min_credit: dto.min_credit.unwrap_or(DEFAULT_MIN_CREDIT),
            max_credit: dto.max_credit.unwrap_or(DEFAULT_MAX_CREDIT),
        }
    }
}

/// Partial update. Only supplied fields change.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_update_window"))]
pub struct UpdateSemesterRegistrationDto {
    pub status: Option<RegistrationStatus>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub min_credit: Option<i32>,
    #[validate(range(min = 1))]
    pub max_credit: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SemesterRegistrationFilterParams {
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub status: Option<RegistrationStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_from_str")]
    pub academic_semester_id: Option<AcademicSemesterId>,
    #[serde(flatten)]
    pub pagination: PaginationParams,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PaginatedSemesterRegistrationsResponse {
    pub data: Vec<SemesterRegistration>,
    pub meta: PaginationMeta,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, month, day, 0, 0, 0).unwrap()
    }

    fn create_dto() -> CreateSemesterRegistrationDto {
        CreateSemesterRegistrationDto {
            academic_semester_id: AcademicSemesterId::new(),
            status: None,
            start_date: date(1, 10),
            end_date: date(4, 30),
            min_credit: None,
            max_credit: None,
        }
    }

    #[test]
    fn test_create_dto_accepts_forward_window() {
        assert!(create_dto().validate().is_ok());
    }

    #[test]
    fn test_create_dto_rejects_inverted_window() {
        let dto = CreateSemesterRegistrationDto {
            start_date: date(5, 1),
            ..create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_create_dto_rejects_min_above_max() {
        let dto = CreateSemesterRegistrationDto {
            min_credit: Some(20),
            ..create_dto()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_defaults_are_resolved() {
        let new: NewSemesterRegistration = create_dto().into();
        assert_eq!(new.status, RegistrationStatus::Upcoming);
        assert_eq!(new.min_credit, 3);
        assert_eq!(new.max_credit, 15);
    }

    #[test]
    fn test_update_dto_checks_only_supplied_fields() {
        let only_end = UpdateSemesterRegistrationDto {
            end_date: Some(date(1, 1)),
            ..Default::default()
        };
        assert!(only_end.validate().is_ok());

        let inverted = UpdateSemesterRegistrationDto {
            start_date: Some(date(6, 1)),
            end_date: Some(date(1, 1)),
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }
}
