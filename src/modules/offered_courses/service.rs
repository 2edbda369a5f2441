use anyhow::anyhow;
use tracing::instrument;

use campusbyte_core::{AppError, ErrorKind, PaginationMeta};
use campusbyte_db::{
    ById, EligibleFaculty, OfferedCourseStore, OfferingSlot, ScheduleKey, ScheduleQuery,
    ScheduleWrite,
};
use campusbyte_models::academic::{AcademicDepartment, AcademicFaculty};
use campusbyte_models::courses::Course;
use campusbyte_models::ids::{CourseId, FacultyId, OfferedCourseId, SemesterRegistrationId};
use campusbyte_models::semester_registrations::SemesterRegistration;
use campusbyte_models::users::Faculty;
use campusbyte_models::value_types::RegistrationStatus;
use campusbyte_observability::{
    track_offered_course_created, track_offered_course_deleted, track_schedule_conflict,
};

use crate::modules::offered_courses::model::{
    CreateOfferedCourseDto, NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams,
    OfferedCoursePatch, PaginatedOfferedCoursesResponse, Schedule, UpdateOfferedCourseDto,
};
use crate::modules::offered_courses::schedule::{has_time_conflict, schedule_changed};
use crate::utils::referential::{Check, require, validate_record};
use crate::utils::store_errors::unique_violation_as;

const OFFERED_COURSE_NOT_FOUND: &str = "Offered course not found";
const NOT_ELIGIBLE: &str = "Faculty is not eligible to take the course";
const DUPLICATE_OFFERING: &str = "Offered course already exists";
const UPDATE_ATTEMPTS: u32 = 3;

pub struct OfferedCourseService;

impl OfferedCourseService {
    /// Creates an offering after every referential and scheduling rule holds.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    #[instrument(skip(store))]
    pub async fn create_offered_course<S>(
        store: &S,
        dto: CreateOfferedCourseDto,
    ) -> Result<OfferedCourse, AppError>
    where
        S: OfferedCourseStore + ?Sized,
    {
        let schedule = dto.schedule()?;

        let registration = require(
            store,
            &ById::<SemesterRegistration>::new(dto.semester_registration_id),
            "Semester registration not found",
        )
        .await?;
        if !registration.status.allows_new_offerings() {
            return Err(AppError::invalid_state(anyhow!(
                "Courses can not be offered for {} semester",
                registration.status
            )));
        }

        require(
            store,
            &ById::<AcademicFaculty>::new(dto.academic_faculty_id),
            "Academic faculty not found",
        )
        .await?;

        let department = require(
            store,
            &ById::<AcademicDepartment>::new(dto.academic_department_id),
            "Academic department not found",
        )
        .await?;
        if department.academic_faculty_id != dto.academic_faculty_id {
            return Err(AppError::invalid_relationship(anyhow!(
                "Academic department does not belong to the faculty"
            )));
        }

        require(store, &ById::<Course>::new(dto.course_id), "Course not found").await?;
        require(store, &ById::<Faculty>::new(dto.faculty_id), "Faculty not found").await?;
        ensure_eligible(store, dto.course_id, dto.faculty_id).await?;

        validate_record(
            store,
            &OfferingSlot {
                semester_registration_id: registration.id,
                course_id: dto.course_id,
                section: dto.section.clone(),
            },
            Check::absent(DUPLICATE_OFFERING).failing_with(ErrorKind::DuplicateOffering),
        )
        .await?;

        let key = ScheduleKey {
            semester_registration_id: registration.id,
            faculty_id: dto.faculty_id,
        };
        let new = NewOfferedCourse {
            semester_registration_id: registration.id,
            academic_semester_id: registration.academic_semester_id,
            academic_faculty_id: dto.academic_faculty_id,
            academic_department_id: dto.academic_department_id,
            course_id: dto.course_id,
            faculty_id: dto.faculty_id,
            section: dto.section,
            max_capacity: dto.max_capacity,
            schedule,
        };

        let mut unit = store.begin_schedule_write(key).await?;
        let result = insert_if_available(unit.as_mut(), key, &new).await;
        let offered_course = finish(unit, result).await?;

        track_offered_course_created();
        tracing::info!(
            offered_course_id = %offered_course.id,
            course_id = %offered_course.course_id,
            faculty_id = %offered_course.faculty_id,
            section = %offered_course.section,
            "Offered course created"
        );
        Ok(offered_course)
    }

    #[instrument(skip(store))]
    pub async fn get_offered_courses<S>(
        store: &S,
        filter: OfferedCourseFilterParams,
    ) -> Result<PaginatedOfferedCoursesResponse, AppError>
    where
        S: OfferedCourseStore + ?Sized,
    {
        let (offered_courses, total) = store.list_offered_courses(&filter).await?;

        Ok(PaginatedOfferedCoursesResponse {
            data: offered_courses,
            meta: PaginationMeta::from_params(&filter.pagination, total),
        })
    }

    #[instrument(skip(store))]
    pub async fn get_offered_course<S>(
        store: &S,
        id: OfferedCourseId,
    ) -> Result<OfferedCourse, AppError>
    where
        S: OfferedCourseStore + ?Sized,
    {
        require(store, &ById::<OfferedCourse>::new(id), OFFERED_COURSE_NOT_FOUND).await
    }

    /// Applies a partial update while the registration is UPCOMING.
    ///
    /// Eligibility is checked against the faculty member the offering ends up
    /// with. The schedule is only re-checked when the faculty member, the days
    /// or the times actually change.
    ///
    /// The write unit locks the offering and re-reads it. When another writer
    /// changed it after the checks ran, they are repeated against the new state.
    #[instrument(skip(store))]
    pub async fn update_offered_course<S>(
        store: &S,
        id: OfferedCourseId,
        dto: UpdateOfferedCourseDto,
    ) -> Result<OfferedCourse, AppError>
    where
        S: OfferedCourseStore + ?Sized,
    {
        let patch = OfferedCoursePatch::from(dto);

        for attempt in 1..=UPDATE_ATTEMPTS {
            let current =
                require(store, &ById::<OfferedCourse>::new(id), OFFERED_COURSE_NOT_FOUND).await?;
            ensure_changes_allowed(store, &current, "updated").await?;

            if let Some(faculty_id) = patch.faculty_id {
                require(store, &ById::<Faculty>::new(faculty_id), "Faculty not found").await?;
            }
            let faculty_id = patch.faculty_id.unwrap_or(current.faculty_id);
            ensure_eligible(store, current.course_id, faculty_id).await?;

            let schedule = Schedule::new(
                patch.days.clone().unwrap_or_else(|| current.days.clone()),
                patch.start_time.unwrap_or(current.start_time),
                patch.end_time.unwrap_or(current.end_time),
            )?;
            let recheck = schedule_changed(&current, &patch);

            let key = ScheduleKey {
                semester_registration_id: current.semester_registration_id,
                faculty_id,
            };
            let mut unit = store.begin_schedule_write(key).await?;
            let result = update_if_unchanged(
                unit.as_mut(),
                key,
                &current,
                &patch,
                recheck.then_some(&schedule),
            )
            .await;

            if let Some(updated) = finish(unit, result).await? {
                tracing::info!(
                    offered_course_id = %id,
                    rescheduled = recheck,
                    "Offered course updated"
                );
                return Ok(updated);
            }
            tracing::debug!(offered_course_id = %id, attempt, "Offered course changed concurrently");
        }

        Err(AppError::conflict(anyhow!(
            "Offered course is being changed by another request"
        )))
    }

    #[instrument(skip(store))]
    pub async fn delete_offered_course<S>(
        store: &S,
        id: OfferedCourseId,
    ) -> Result<OfferedCourse, AppError>
    where
        S: OfferedCourseStore + ?Sized,
    {
        let current = require(store, &ById::<OfferedCourse>::new(id), OFFERED_COURSE_NOT_FOUND).await?;
        ensure_changes_allowed(store, &current, "deleted").await?;

        let key = ScheduleKey {
            semester_registration_id: current.semester_registration_id,
            faculty_id: current.faculty_id,
        };
        let mut unit = store.begin_schedule_write(key).await?;
        let result = delete_if_allowed(unit.as_mut(), &current).await;
        let deleted = finish(unit, result).await?;

        track_offered_course_deleted();
        tracing::info!(offered_course_id = %id, "Offered course deleted");
        Ok(deleted)
    }
}

async fn ensure_eligible<S>(store: &S, course_id: CourseId, faculty_id: FacultyId) -> Result<(), AppError>
where
    S: OfferedCourseStore + ?Sized,
{
    validate_record(
        store,
        &EligibleFaculty {
            course_id,
            faculty_id,
        },
        Check::exists(NOT_ELIGIBLE).failing_with(ErrorKind::NotEligible),
    )
    .await?;
    Ok(())
}

async fn ensure_changes_allowed<S>(
    store: &S,
    offered_course: &OfferedCourse,
    action: &str,
) -> Result<(), AppError>
where
    S: OfferedCourseStore + ?Sized,
{
    let registration = require(
        store,
        &ById::<SemesterRegistration>::new(offered_course.semester_registration_id),
        "Semester registration not found",
    )
    .await?;
    if !registration.status.allows_offering_changes() {
        return Err(AppError::invalid_state(anyhow!(
            "Offered course can only be {} for UPCOMING semester",
            action
        )));
    }
    Ok(())
}

async fn ensure_available(
    unit: &mut dyn ScheduleWrite,
    key: ScheduleKey,
    schedule: &Schedule,
    exclude: Option<OfferedCourseId>,
) -> Result<(), AppError> {
    let query = ScheduleQuery {
        key,
        days: schedule.days.clone(),
        exclude,
    };
    let assigned = unit.assigned_schedules(&query).await?;

    if has_time_conflict(&assigned, schedule) {
        track_schedule_conflict();
        return Err(AppError::schedule_conflict(anyhow!(
            "Faculty is not available at that time"
        )));
    }
    Ok(())
}

async fn insert_if_available(
    unit: &mut dyn ScheduleWrite,
    key: ScheduleKey,
    new: &NewOfferedCourse,
) -> Result<OfferedCourse, AppError> {
    let status = locked_status(unit, key.semester_registration_id).await?;
    if !status.allows_new_offerings() {
        return Err(AppError::invalid_state(anyhow!(
            "Courses can not be offered for {} semester",
            status
        )));
    }
    ensure_available(unit, key, &new.schedule, None).await?;

    unit.insert_offered_course(new)
        .await
        .map_err(|e| unique_violation_as(e, ErrorKind::DuplicateOffering, DUPLICATE_OFFERING))
}

/// Applies `patch` when the offering still matches `expected`.
///
/// `Ok(None)` means another writer got there first and nothing was written.
async fn update_if_unchanged(
    unit: &mut dyn ScheduleWrite,
    key: ScheduleKey,
    expected: &OfferedCourse,
    patch: &OfferedCoursePatch,
    recheck: Option<&Schedule>,
) -> Result<Option<OfferedCourse>, AppError> {
    let locked = unit
        .lock_offered_course(expected.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!(OFFERED_COURSE_NOT_FOUND)))?;
    if locked != *expected {
        return Ok(None);
    }

    ensure_locked_changes_allowed(unit, key.semester_registration_id, "updated").await?;

    if let Some(schedule) = recheck {
        ensure_available(unit, key, schedule, Some(expected.id)).await?;
    }

    let updated = unit
        .update_offered_course(expected.id, patch)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!(OFFERED_COURSE_NOT_FOUND)))?;
    Ok(Some(updated))
}

async fn delete_if_allowed(
    unit: &mut dyn ScheduleWrite,
    offered: &OfferedCourse,
) -> Result<OfferedCourse, AppError> {
    unit.lock_offered_course(offered.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!(OFFERED_COURSE_NOT_FOUND)))?;
    ensure_locked_changes_allowed(unit, offered.semester_registration_id, "deleted").await?;

    unit.delete_offered_course(offered.id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!(OFFERED_COURSE_NOT_FOUND)))
}

async fn ensure_locked_changes_allowed(
    unit: &mut dyn ScheduleWrite,
    registration_id: SemesterRegistrationId,
    action: &str,
) -> Result<(), AppError> {
    let status = locked_status(unit, registration_id).await?;
    if !status.allows_offering_changes() {
        return Err(AppError::invalid_state(anyhow!(
            "Offered course can only be {} for UPCOMING semester",
            action
        )));
    }
    Ok(())
}

async fn locked_status(
    unit: &mut dyn ScheduleWrite,
    registration_id: SemesterRegistrationId,
) -> Result<RegistrationStatus, AppError> {
    unit.registration_status(registration_id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow!("Semester registration not found")))
}

/// Commits the unit when `result` succeeded, rolls it back otherwise.
async fn finish<T>(unit: Box<dyn ScheduleWrite>, result: Result<T, AppError>) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            unit.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = unit.rollback().await {
                tracing::warn!(error = %rollback_err, "Failed to roll back schedule write");
            }
            Err(err)
        }
    }
}
