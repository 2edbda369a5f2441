//! Store-level checks against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set and `cargo test -- --ignored`.

mod common;

use std::time::Duration;

use campusbyte::modules::courses::service::CourseService;
use campusbyte::modules::offered_courses::service::OfferedCourseService;
use campusbyte::modules::users::service::UserService;
use campusbyte_core::ErrorKind;
use campusbyte_db::{
    CatalogStore, OfferedCourseStore, PgPool, PgStore, ScheduleKey, ScheduleWrite,
};
use campusbyte_models::academic::{
    AcademicDepartment, CreateAcademicDepartmentDto, CreateAcademicFacultyDto,
    CreateAcademicSemesterDto,
};
use campusbyte_models::courses::{AssignCourseFacultiesDto, CreateCourseDto};
use campusbyte_models::ids::AcademicSemesterId;
use campusbyte_models::offered_courses::{
    CreateOfferedCourseDto, OfferedCoursePatch, UpdateOfferedCourseDto,
};
use campusbyte_models::semester_registrations::{
    NewSemesterRegistration, UpdateSemesterRegistrationDto,
};
use campusbyte_models::value_types::{BloodGroup, Day, Month, RegistrationStatus, SemesterName};
use chrono::{TimeZone, Utc};
use common::{faculty_profile, student_profile_in, t, test_config};

async fn seed_offering(store: &PgStore) -> (CreateOfferedCourseDto, AcademicDepartment) {
    let semester = store
        .insert_academic_semester(&CreateAcademicSemesterDto {
            name: SemesterName::Summer,
            code: SemesterName::Summer.code(),
            year: 2031,
            start_month: Month::May,
            end_month: Month::August,
        })
        .await
        .unwrap();
    let academic_faculty = store
        .insert_academic_faculty(&CreateAcademicFacultyDto {
            name: "Faculty of Science".into(),
        })
        .await
        .unwrap();
    let department = store
        .insert_academic_department(&CreateAcademicDepartmentDto {
            name: "Physics".into(),
            academic_faculty_id: academic_faculty.id,
        })
        .await
        .unwrap();
    let course = store
        .insert_course(&CreateCourseDto {
            title: "Mechanics".into(),
            prefix: "PHY".into(),
            code: 101,
            credits: 3,
        })
        .await
        .unwrap();
    let faculty = UserService::create_faculty(
        store,
        &test_config(),
        None,
        faculty_profile(&department, "feynman@uni.edu"),
    )
    .await
    .unwrap()
    .faculty;
    CourseService::assign_faculties(
        store,
        course.id,
        AssignCourseFacultiesDto {
            faculties: vec![faculty.id],
        },
    )
    .await
    .unwrap();
    let registration = store
        .insert_semester_registration(&NewSemesterRegistration {
            academic_semester_id: semester.id,
            status: RegistrationStatus::Upcoming,
            start_date: Utc.with_ymd_and_hms(2031, 5, 1, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2031, 8, 31, 0, 0, 0).unwrap(),
            min_credit: 3,
            max_credit: 15,
        })
        .await
        .unwrap();

    let dto = CreateOfferedCourseDto {
        semester_registration_id: registration.id,
        academic_faculty_id: academic_faculty.id,
        academic_department_id: department.id,
        course_id: course.id,
        faculty_id: faculty.id,
        section: "A".into(),
        max_capacity: 30,
        days: vec![Day::Mon],
        start_time: t("09:00"),
        end_time: t("10:00"),
    };
    (dto, department)
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_rejects_overlap_and_duplicate_section(pool: PgPool) {
    let store = PgStore::new(pool);
    let (dto, _) = seed_offering(&store).await;

    OfferedCourseService::create_offered_course(&store, dto.clone())
        .await
        .unwrap();

    let duplicate = OfferedCourseService::create_offered_course(&store, dto.clone())
        .await
        .unwrap_err();
    assert_eq!(duplicate.kind, ErrorKind::DuplicateOffering);

    let mut overlapping = dto;
    overlapping.section = "B".into();
    overlapping.start_time = t("09:30");
    overlapping.end_time = t("10:30");
    let clash = OfferedCourseService::create_offered_course(&store, overlapping)
        .await
        .unwrap_err();
    assert_eq!(clash.kind, ErrorKind::ScheduleConflict);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_failed_provisioning_keeps_no_user(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (_, department) = seed_offering(&store).await;

    let before: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();

    let err = UserService::create_faculty(
        &store,
        &test_config(),
        None,
        faculty_profile(&department, "feynman@uni.edu"),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CreationFailed);

    let after: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(before, after);

    let next = UserService::create_faculty(
        &store,
        &test_config(),
        None,
        faculty_profile(&department, "dirac@uni.edu"),
    )
    .await
    .unwrap();
    assert_eq!(next.user.login_id, "F-0002");
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_offered_course_blocks_course_delete(pool: PgPool) {
    let store = PgStore::new(pool);
    let (dto, _) = seed_offering(&store).await;
    let offering = OfferedCourseService::create_offered_course(&store, dto.clone())
        .await
        .unwrap();

    let err = CourseService::delete_course(&store, dto.course_id)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    OfferedCourseService::delete_offered_course(&store, offering.id)
        .await
        .unwrap();
    let deleted = CourseService::delete_course(&store, dto.course_id)
        .await
        .unwrap();
    assert_eq!(deleted.id, dto.course_id);
    assert!(store.course_faculties(dto.course_id).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_student_keeps_guardians_and_blood_group(pool: PgPool) {
    let store = PgStore::new(pool.clone());
    let (_, department) = seed_offering(&store).await;
    let semester_id: AcademicSemesterId =
        sqlx::query_scalar("SELECT id FROM academic_semesters LIMIT 1")
            .fetch_one(&pool)
            .await
            .unwrap();

    let mut profile = student_profile_in(semester_id, department.id, "curie@uni.edu");
    profile.blood_group = Some(BloodGroup::AbNegative);
    profile.profile_img = Some("https://cdn.uni.edu/avatars/curie.png".into());

    let student = UserService::create_student(&store, &test_config(), None, profile.clone())
        .await
        .unwrap()
        .student;

    assert_eq!(student.guardian, profile.guardian);
    assert_eq!(student.local_guardian, profile.local_guardian);
    assert_eq!(student.blood_group, Some(BloodGroup::AbNegative));
    assert_eq!(student.profile_img, profile.profile_img);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_update_rechecks_after_faculty_moved(pool: PgPool) {
    let store = PgStore::new(pool);
    let (dto, department) = seed_offering(&store).await;
    let colleague = UserService::create_faculty(
        &store,
        &test_config(),
        None,
        faculty_profile(&department, "dirac@uni.edu"),
    )
    .await
    .unwrap()
    .faculty;
    CourseService::assign_faculties(
        &store,
        dto.course_id,
        AssignCourseFacultiesDto {
            faculties: vec![colleague.id],
        },
    )
    .await
    .unwrap();

    let moving = OfferedCourseService::create_offered_course(&store, dto.clone())
        .await
        .unwrap();
    let mut busy = dto.clone();
    busy.section = "B".into();
    busy.faculty_id = colleague.id;
    busy.start_time = t("11:00");
    busy.end_time = t("12:00");
    OfferedCourseService::create_offered_course(&store, busy)
        .await
        .unwrap();

    // Holds the colleague's schedule key and the offering row.
    let mut reassignment = store
        .begin_schedule_write(ScheduleKey {
            semester_registration_id: dto.semester_registration_id,
            faculty_id: colleague.id,
        })
        .await
        .unwrap();
    reassignment.lock_offered_course(moving.id).await.unwrap();
    reassignment
        .update_offered_course(
            moving.id,
            &OfferedCoursePatch {
                faculty_id: Some(colleague.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let other = store.clone();
    let moving_id = moving.id;
    let reschedule = tokio::spawn(async move {
        OfferedCourseService::update_offered_course(
            &other,
            moving_id,
            UpdateOfferedCourseDto {
                start_time: Some(t("11:00")),
                end_time: Some(t("12:00")),
                ..Default::default()
            },
        )
        .await
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    reassignment.commit().await.unwrap();

    let err = reschedule.await.unwrap().unwrap_err();
    assert_eq!(err.kind, ErrorKind::ScheduleConflict);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires PostgreSQL"]
async fn test_postgres_status_change_waits_for_schedule_write(pool: PgPool) {
    let store = PgStore::new(pool);
    let (dto, _) = seed_offering(&store).await;

    let mut unit = store
        .begin_schedule_write(ScheduleKey {
            semester_registration_id: dto.semester_registration_id,
            faculty_id: dto.faculty_id,
        })
        .await
        .unwrap();
    assert_eq!(
        unit.registration_status(dto.semester_registration_id)
            .await
            .unwrap(),
        Some(RegistrationStatus::Upcoming)
    );

    let other = store.clone();
    let registration_id = dto.semester_registration_id;
    let opening = tokio::spawn(async move {
        other
            .update_semester_registration(
                registration_id,
                &UpdateSemesterRegistrationDto {
                    status: Some(RegistrationStatus::Ongoing),
                    ..Default::default()
                },
            )
            .await
    });
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!opening.is_finished());

    unit.commit().await.unwrap();
    let opened = opening.await.unwrap().unwrap().unwrap();
    assert_eq!(opened.status, RegistrationStatus::Ongoing);
}
