use utoipa::OpenApi;

use campusbyte_core::{ErrorKind, ErrorResponse, PaginationMeta, PaginationParams};
use campusbyte_models::academic::{
    AcademicDepartment, AcademicDepartmentFilterParams, AcademicFaculty, AcademicSemester,
    CreateAcademicDepartmentDto, CreateAcademicFacultyDto, CreateAcademicSemesterDto,
    PaginatedAcademicDepartmentsResponse, PaginatedAcademicFacultiesResponse,
    PaginatedAcademicSemestersResponse,
};
use campusbyte_models::courses::{
    AssignCourseFacultiesDto, Course, CourseFacultiesResponse, CreateCourseDto,
    PaginatedCoursesResponse, UpdateCourseDto,
};
use campusbyte_models::offered_courses::{
    CreateOfferedCourseDto, OfferedCourse, OfferedCourseFilterParams,
    PaginatedOfferedCoursesResponse, Schedule, UpdateOfferedCourseDto,
};
use campusbyte_models::semester_registrations::{
    CreateSemesterRegistrationDto, PaginatedSemesterRegistrationsResponse, SemesterRegistration,
    SemesterRegistrationFilterParams, UpdateSemesterRegistrationDto,
};
use campusbyte_models::users::{
    Admin, AdminAccount, AdminProfileDto, CreateAdminRequest, CreateFacultyRequest,
    CreateStudentRequest, Faculty, FacultyAccount, FacultyProfileDto, Guardian, LocalGuardian,
    Student, StudentAccount, StudentProfileDto, User,
};
use campusbyte_models::value_types::{
    BloodGroup, ClockTime, Day, Gender, Month, RegistrationStatus, SemesterCode, SemesterName,
    UserRole, UserStatus,
};

use crate::router::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::users::controller::create_student,
        crate::modules::users::controller::create_faculty,
        crate::modules::users::controller::create_admin,
        crate::modules::academic_semesters::controller::create_academic_semester,
        crate::modules::academic_semesters::controller::get_academic_semesters,
        crate::modules::academic_semesters::controller::get_academic_semester,
        crate::modules::academic_faculties::controller::create_academic_faculty,
        crate::modules::academic_faculties::controller::get_academic_faculties,
        crate::modules::academic_faculties::controller::get_academic_faculty,
        crate::modules::academic_departments::controller::create_academic_department,
        crate::modules::academic_departments::controller::get_academic_departments,
        crate::modules::academic_departments::controller::get_academic_department,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::assign_faculties,
        crate::modules::courses::controller::remove_faculties,
        crate::modules::courses::controller::get_faculties,
        crate::modules::semester_registrations::controller::create_semester_registration,
        crate::modules::semester_registrations::controller::get_semester_registrations,
        crate::modules::semester_registrations::controller::get_semester_registration,
        crate::modules::semester_registrations::controller::update_semester_registration,
        crate::modules::offered_courses::controller::create_offered_course,
        crate::modules::offered_courses::controller::get_offered_courses,
        crate::modules::offered_courses::controller::get_offered_course,
        crate::modules::offered_courses::controller::update_offered_course,
        crate::modules::offered_courses::controller::delete_offered_course,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorKind,
            ErrorResponse,
            PaginationMeta,
            PaginationParams,
            ClockTime,
            Day,
            Gender,
            Month,
            RegistrationStatus,
            SemesterCode,
            SemesterName,
            UserRole,
            UserStatus,
            User,
            Student,
            Guardian,
            LocalGuardian,
            BloodGroup,
            Faculty,
            Admin,
            StudentProfileDto,
            FacultyProfileDto,
            AdminProfileDto,
            CreateStudentRequest,
            CreateFacultyRequest,
            CreateAdminRequest,
            StudentAccount,
            FacultyAccount,
            AdminAccount,
            AcademicSemester,
            CreateAcademicSemesterDto,
            PaginatedAcademicSemestersResponse,
            AcademicFaculty,
            CreateAcademicFacultyDto,
            PaginatedAcademicFacultiesResponse,
            AcademicDepartment,
            CreateAcademicDepartmentDto,
            AcademicDepartmentFilterParams,
            PaginatedAcademicDepartmentsResponse,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            AssignCourseFacultiesDto,
            CourseFacultiesResponse,
            PaginatedCoursesResponse,
            SemesterRegistration,
            CreateSemesterRegistrationDto,
            UpdateSemesterRegistrationDto,
            SemesterRegistrationFilterParams,
            PaginatedSemesterRegistrationsResponse,
            Schedule,
            OfferedCourse,
            CreateOfferedCourseDto,
            UpdateOfferedCourseDto,
            OfferedCourseFilterParams,
            PaginatedOfferedCoursesResponse,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Users", description = "Account provisioning for students, faculty and admins"),
        (name = "Academic Semesters", description = "Semesters of an academic year"),
        (name = "Academic Faculties", description = "Academic faculties"),
        (name = "Academic Departments", description = "Departments within an academic faculty"),
        (name = "Courses", description = "Course catalog and faculty eligibility"),
        (name = "Semester Registrations", description = "Registration periods and their status lifecycle"),
        (name = "Offered Courses", description = "Course offerings and faculty schedules")
    ),
    info(
        title = "Campusbyte API",
        version = "0.1.0",
        description = "University academic management API: catalog, semester registrations, course offerings with schedule conflict detection, and account provisioning.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
