#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use campusbyte::modules::courses::service::CourseService;
use campusbyte::modules::users::service::UserService;
use campusbyte::router::init_router;
use campusbyte::state::AppState;
use campusbyte_config::ProvisioningConfig;
use campusbyte_db::{CatalogStore, MemoryStore};
use campusbyte_models::academic::{
    AcademicDepartment, AcademicFaculty, AcademicSemester, CreateAcademicDepartmentDto,
    CreateAcademicFacultyDto, CreateAcademicSemesterDto,
};
use campusbyte_models::courses::{AssignCourseFacultiesDto, Course, CreateCourseDto};
use campusbyte_models::ids::{AcademicDepartmentId, AcademicSemesterId, SemesterRegistrationId};
use campusbyte_models::offered_courses::CreateOfferedCourseDto;
use campusbyte_models::semester_registrations::{
    NewSemesterRegistration, SemesterRegistration, UpdateSemesterRegistrationDto,
};
use campusbyte_models::users::{
    Faculty, FacultyProfileDto, Guardian, LocalGuardian, StudentProfileDto,
};
use campusbyte_models::value_types::{
    BloodGroup, ClockTime, Day, Gender, Month, RegistrationStatus, SemesterName,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const DEFAULT_PASSWORD: &str = "campus-default-pass";

/// Low bcrypt cost keeps provisioning tests fast.
pub fn test_config() -> ProvisioningConfig {
    ProvisioningConfig {
        default_password: DEFAULT_PASSWORD.to_string(),
        bcrypt_cost: 4,
    }
}

pub fn test_app(store: &MemoryStore) -> Router {
    let state = AppState::new(Arc::new(store.clone()), test_config());
    init_router(state)
}

pub fn t(value: &str) -> ClockTime {
    value.parse().unwrap()
}

/// A catalog with one of everything an offering needs.
pub struct Campus {
    pub store: MemoryStore,
    pub semester: AcademicSemester,
    pub academic_faculty: AcademicFaculty,
    pub department: AcademicDepartment,
    pub course: Course,
    pub faculty: Faculty,
    pub registration: SemesterRegistration,
}

impl Campus {
    pub async fn seed() -> Self {
        let store = MemoryStore::new();

        let semester = store
            .insert_academic_semester(&CreateAcademicSemesterDto {
                name: SemesterName::Autumn,
                code: SemesterName::Autumn.code(),
                year: 2030,
                start_month: Month::January,
                end_month: Month::April,
            })
            .await
            .unwrap();

        let academic_faculty = store
            .insert_academic_faculty(&CreateAcademicFacultyDto {
                name: "Faculty of Engineering".into(),
            })
            .await
            .unwrap();

        let department = store
            .insert_academic_department(&CreateAcademicDepartmentDto {
                name: "Computer Science".into(),
                academic_faculty_id: academic_faculty.id,
            })
            .await
            .unwrap();

        let course = store
            .insert_course(&CreateCourseDto {
                title: "Data Structures".into(),
                prefix: "CSE".into(),
                code: 201,
                credits: 3,
            })
            .await
            .unwrap();

        let faculty = UserService::create_faculty(
            &store,
            &test_config(),
            None,
            faculty_profile(&department, "lecturer@uni.edu"),
        )
        .await
        .unwrap()
        .faculty;

        CourseService::assign_faculties(
            &store,
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
                start_date: Utc.with_ymd_and_hms(2030, 1, 10, 0, 0, 0).unwrap(),
                end_date: Utc.with_ymd_and_hms(2030, 4, 30, 0, 0, 0).unwrap(),
                min_credit: 3,
                max_credit: 15,
            })
            .await
            .unwrap();

        Self {
            store,
            semester,
            academic_faculty,
            department,
            course,
            faculty,
            registration,
        }
    }

    /// An offering of the seeded course by the seeded faculty member.
    pub fn offering(&self, section: &str, days: &[Day], start: &str, end: &str) -> CreateOfferedCourseDto {
        CreateOfferedCourseDto {
            semester_registration_id: self.registration.id,
            academic_faculty_id: self.academic_faculty.id,
            academic_department_id: self.department.id,
            course_id: self.course.id,
            faculty_id: self.faculty.id,
            section: section.into(),
            max_capacity: 40,
            days: days.to_vec(),
            start_time: t(start),
            end_time: t(end),
        }
    }

    /// Adds another course the seeded faculty member may teach.
    pub async fn add_course(&self, title: &str, code: i32) -> Course {
        let course = self
            .store
            .insert_course(&CreateCourseDto {
                title: title.into(),
                prefix: "CSE".into(),
                code,
                credits: 3,
            })
            .await
            .unwrap();
        CourseService::assign_faculties(
            &self.store,
            course.id,
            AssignCourseFacultiesDto {
                faculties: vec![self.faculty.id],
            },
        )
        .await
        .unwrap();
        course
    }

    pub async fn add_faculty(&self, email: &str) -> Faculty {
        UserService::create_faculty(
            &self.store,
            &test_config(),
            None,
            faculty_profile(&self.department, email),
        )
        .await
        .unwrap()
        .faculty
    }

    /// Forces the registration status, skipping the transition rules.
    pub async fn set_status(&self, id: SemesterRegistrationId, status: RegistrationStatus) {
        self.store
            .update_semester_registration(
                id,
                &UpdateSemesterRegistrationDto {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
    }
}

pub fn faculty_profile(department: &AcademicDepartment, email: &str) -> FacultyProfileDto {
    FacultyProfileDto {
        designation: "Lecturer".into(),
        first_name: "Grace".into(),
        middle_name: None,
        last_name: "Hopper".into(),
        gender: Gender::Female,
        date_of_birth: None,
        email: email.into(),
        contact_no: "01711111111".into(),
        emergency_contact_no: "01722222222".into(),
        present_address: "1 Faculty Lane".into(),
        permanent_address: "1 Faculty Lane".into(),
        academic_department_id: department.id,
    }
}

pub fn student_profile(campus: &Campus, email: &str) -> StudentProfileDto {
    student_profile_in(campus.semester.id, campus.department.id, email)
}

pub fn student_profile_in(
    semester_id: AcademicSemesterId,
    department_id: AcademicDepartmentId,
    email: &str,
) -> StudentProfileDto {
    StudentProfileDto {
        first_name: "Alan".into(),
        middle_name: None,
        last_name: "Turing".into(),
        gender: Gender::Male,
        date_of_birth: None,
        email: email.into(),
        contact_no: "01733333333".into(),
        emergency_contact_no: "01744444444".into(),
        present_address: "7 Dorm Street".into(),
        permanent_address: "7 Dorm Street".into(),
        guardian: Guardian {
            father_name: "Julius Turing".into(),
            father_occupation: "Civil servant".into(),
            father_contact_no: "01755555555".into(),
            mother_name: "Ethel Turing".into(),
            mother_occupation: "Artist".into(),
            mother_contact_no: "01766666666".into(),
        },
        local_guardian: LocalGuardian {
            name: "Sara Stoney".into(),
            occupation: "Teacher".into(),
            contact_no: "01777777777".into(),
            address: "3 Harbour Road".into(),
        },
        blood_group: Some(BloodGroup::OPositive),
        profile_img: None,
        admission_semester_id: semester_id,
        academic_department_id: department_id,
    }
}

/// Sends a request through the router and decodes the JSON body.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
