mod common;

use campusbyte::modules::academic_departments::service::AcademicDepartmentService;
use campusbyte::modules::courses::service::CourseService;
use campusbyte::modules::semester_registrations::service::SemesterRegistrationService;
use campusbyte_core::ErrorKind;
use campusbyte_models::academic::{AcademicDepartmentFilterParams, CreateAcademicDepartmentDto};
use campusbyte_models::courses::AssignCourseFacultiesDto;
use campusbyte_models::ids::{AcademicFacultyId, FacultyId};
use campusbyte_models::semester_registrations::{
    CreateSemesterRegistrationDto, UpdateSemesterRegistrationDto,
};
use campusbyte_models::value_types::RegistrationStatus;
use chrono::{TimeZone, Utc};
use common::Campus;

fn registration_for(campus: &Campus) -> CreateSemesterRegistrationDto {
    CreateSemesterRegistrationDto {
        academic_semester_id: campus.semester.id,
        status: None,
        start_date: Utc.with_ymd_and_hms(2030, 6, 1, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2030, 9, 1, 0, 0, 0).unwrap(),
        min_credit: None,
        max_credit: None,
    }
}

#[tokio::test]
async fn test_second_open_registration_is_rejected() {
    let campus = Campus::seed().await;

    let err = SemesterRegistrationService::create_semester_registration(
        &campus.store,
        registration_for(&campus),
    )
    .await
    .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(
        err.message(),
        "There is already an UPCOMING or ONGOING registered semester"
    );
}

#[tokio::test]
async fn test_registration_walks_forward_to_ended() {
    let campus = Campus::seed().await;
    let id = campus.registration.id;

    let skip = SemesterRegistrationService::update_semester_registration(
        &campus.store,
        id,
        UpdateSemesterRegistrationDto {
            status: Some(RegistrationStatus::Ended),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(skip.kind, ErrorKind::InvalidState);

    for status in [RegistrationStatus::Ongoing, RegistrationStatus::Ended] {
        let updated = SemesterRegistrationService::update_semester_registration(
            &campus.store,
            id,
            UpdateSemesterRegistrationDto {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.status, status);
    }

    let frozen = SemesterRegistrationService::update_semester_registration(
        &campus.store,
        id,
        UpdateSemesterRegistrationDto {
            max_credit: Some(18),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(frozen.kind, ErrorKind::InvalidState);
    assert_eq!(
        frozen.message(),
        "This semester registration has already ENDED"
    );
}

#[tokio::test]
async fn test_semester_already_registered_conflicts_after_end() {
    let campus = Campus::seed().await;
    campus
        .set_status(campus.registration.id, RegistrationStatus::Ended)
        .await;

    let err = SemesterRegistrationService::create_semester_registration(
        &campus.store,
        registration_for(&campus),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message(), "This semester is already registered");
}

#[tokio::test]
async fn test_course_faculty_assignment_is_idempotent() {
    let campus = Campus::seed().await;
    let colleague = campus.add_faculty("colleague@uni.edu").await;

    let assigned = CourseService::assign_faculties(
        &campus.store,
        campus.course.id,
        AssignCourseFacultiesDto {
            faculties: vec![campus.faculty.id, colleague.id],
        },
    )
    .await
    .unwrap();
    assert_eq!(assigned.faculties.len(), 2);

    let removed = CourseService::remove_faculties(
        &campus.store,
        campus.course.id,
        AssignCourseFacultiesDto {
            faculties: vec![campus.faculty.id],
        },
    )
    .await
    .unwrap();
    assert_eq!(removed.faculties, vec![colleague.id]);

    let listed = CourseService::get_faculties(&campus.store, campus.course.id)
        .await
        .unwrap();
    assert_eq!(listed.faculties, vec![colleague.id]);
}

#[tokio::test]
async fn test_assigning_unknown_faculty_fails() {
    let campus = Campus::seed().await;

    let err = CourseService::assign_faculties(
        &campus.store,
        campus.course.id,
        AssignCourseFacultiesDto {
            faculties: vec![FacultyId::new()],
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message(), "Faculty not found");
}

#[tokio::test]
async fn test_departments_filter_by_academic_faculty() {
    let campus = Campus::seed().await;

    let filtered = AcademicDepartmentService::get_academic_departments(
        &campus.store,
        AcademicDepartmentFilterParams {
            academic_faculty_id: Some(campus.academic_faculty.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.meta.total, 1);
    assert_eq!(filtered.data[0].id, campus.department.id);

    let none = AcademicDepartmentService::get_academic_departments(
        &campus.store,
        AcademicDepartmentFilterParams {
            academic_faculty_id: Some(AcademicFacultyId::new()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(none.meta.total, 0);
}

#[tokio::test]
async fn test_department_requires_existing_academic_faculty() {
    let campus = Campus::seed().await;

    let err = AcademicDepartmentService::create_academic_department(
        &campus.store,
        CreateAcademicDepartmentDto {
            name: "Mathematics".into(),
            academic_faculty_id: AcademicFacultyId::new(),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message(), "Academic faculty not found");
}
