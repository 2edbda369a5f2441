//! # Campusbyte Models
//!
//! Domain models and DTOs for the Campusbyte API.
//!
//! # Modules
//!
//! - [`ids`]: Strongly-typed UUID newtypes
//! - [`value_types`]: Clock times, weekdays, statuses and other text-backed enums
//! - [`academic`]: Academic semesters, faculties and departments
//! - [`courses`]: Course catalog and faculty eligibility
//! - [`semester_registrations`]: Registration periods and their lifecycle status
//! - [`offered_courses`]: Course offerings and their weekly schedules
//! - [`users`]: Login identities and the student/faculty/admin profiles
//!
//! # Example
//!
//! ```ignore
//! use campusbyte_models::offered_courses::Schedule;
//! use campusbyte_models::value_types::{ClockTime, Day};
//!
//! let schedule = Schedule::new(
//!     vec![Day::Mon, Day::Wed],
//!     "09:00".parse()?,
//!     "10:30".parse()?,
//! )?;
//! ```

pub mod academic;
pub mod courses;
pub mod ids;
pub mod offered_courses;
pub mod semester_registrations;
pub mod users;
pub mod value_types;

pub use academic::{
    AcademicDepartment, AcademicFaculty, AcademicSemester, CreateAcademicDepartmentDto,
    CreateAcademicFacultyDto, CreateAcademicSemesterDto,
};
pub use courses::{
    AssignCourseFacultiesDto, Course, CourseFacultiesResponse, CourseFacultyLink, UpdateCourseDto,
};
pub use offered_courses::{
    CreateOfferedCourseDto, NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams,
    OfferedCoursePatch, Schedule, UpdateOfferedCourseDto,
};
pub use semester_registrations::{
    CreateSemesterRegistrationDto, NewSemesterRegistration, SemesterRegistration,
    UpdateSemesterRegistrationDto,
};
pub use users::{Admin, Faculty, Guardian, LocalGuardian, NewUser, ProfileOwner, Student, User};
pub use value_types::{
    BloodGroup, ClockTime, Day, Gender, Month, RegistrationStatus, SemesterCode, SemesterName, UserRole,
    UserStatus, ValueTypeError,
};
