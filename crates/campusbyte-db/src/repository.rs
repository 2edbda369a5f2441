//! Store traits.
//!
//! The application depends on these traits only. [`PgStore`](crate::PgStore)
//! implements them against Postgres, [`MemoryStore`](crate::MemoryStore)
//! keeps everything in process.
//!
//! - [`CatalogStore`]: academic structure, courses, eligibility, registrations
//! - [`OfferedCourseStore`]: offerings, written through a [`ScheduleWrite`] unit
//! - [`AccountStore`]: users and profiles, written through an [`AccountTransaction`]
//!
//! Use the [`CampusStore`] bound when everything is needed.

use async_trait::async_trait;
use campusbyte_models::academic::{
    AcademicDepartment, AcademicDepartmentFilterParams, AcademicFaculty, AcademicSemester,
    CreateAcademicDepartmentDto, CreateAcademicFacultyDto, CreateAcademicSemesterDto,
};
use campusbyte_models::courses::{Course, CreateCourseDto, UpdateCourseDto};
use campusbyte_models::ids::{
    CourseId, FacultyId, OfferedCourseId, SemesterRegistrationId,
};
use campusbyte_models::offered_courses::{
    NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams, OfferedCoursePatch, Schedule,
};
use campusbyte_models::semester_registrations::{
    NewSemesterRegistration, SemesterRegistration, SemesterRegistrationFilterParams,
    UpdateSemesterRegistrationDto,
};
use campusbyte_models::users::{
    Admin, AdminProfileDto, Faculty, FacultyProfileDto, NewUser, ProfileOwner, Student,
    StudentProfileDto, User,
};
use campusbyte_models::value_types::{Day, RegistrationStatus};

use crate::error::RepositoryResult;
use crate::lookup::{ById, EligibleFaculty, FindOne, OfferingSlot, OpenRegistration};

/// Reads and writes for the entities offerings are validated against.
#[async_trait]
pub trait CatalogStore:
    FindOne<ById<AcademicSemester>>
    + FindOne<ById<AcademicFaculty>>
    + FindOne<ById<AcademicDepartment>>
    + FindOne<ById<Course>>
    + FindOne<ById<Faculty>>
    + FindOne<ById<SemesterRegistration>>
    + FindOne<EligibleFaculty>
    + FindOne<OpenRegistration>
{
    async fn health_check(&self) -> RepositoryResult<bool>;

    async fn insert_academic_semester(
        &self,
        dto: &CreateAcademicSemesterDto,
    ) -> RepositoryResult<AcademicSemester>;

    async fn list_academic_semesters(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicSemester>, i64)>;

    async fn insert_academic_faculty(
        &self,
        dto: &CreateAcademicFacultyDto,
    ) -> RepositoryResult<AcademicFaculty>;

    async fn list_academic_faculties(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicFaculty>, i64)>;

    async fn insert_academic_department(
        &self,
        dto: &CreateAcademicDepartmentDto,
    ) -> RepositoryResult<AcademicDepartment>;

    async fn list_academic_departments(
        &self,
        filter: &AcademicDepartmentFilterParams,
    ) -> RepositoryResult<(Vec<AcademicDepartment>, i64)>;

    async fn insert_course(&self, dto: &CreateCourseDto) -> RepositoryResult<Course>;

    async fn list_courses(&self, limit: i64, offset: i64) -> RepositoryResult<(Vec<Course>, i64)>;

    /// Applies the set fields. `None` when the course does not exist.
    async fn update_course(
        &self,
        id: CourseId,
        dto: &UpdateCourseDto,
    ) -> RepositoryResult<Option<Course>>;

    /// Removes the course and its eligibility rows.
    ///
    /// Fails with [`RepositoryError::ForeignKeyViolation`](crate::RepositoryError::ForeignKeyViolation)
    /// while offerings still reference the course.
    async fn delete_course(&self, id: CourseId) -> RepositoryResult<Option<Course>>;

    /// Adds eligibility rows, ignoring ones that already exist. Returns the full list.
    async fn add_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>>;

    /// Removes eligibility rows. Returns the remaining list.
    async fn remove_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>>;

    async fn course_faculties(&self, course_id: CourseId) -> RepositoryResult<Vec<FacultyId>>;

    async fn insert_semester_registration(
        &self,
        new: &NewSemesterRegistration,
    ) -> RepositoryResult<SemesterRegistration>;

    async fn list_semester_registrations(
        &self,
        filter: &SemesterRegistrationFilterParams,
    ) -> RepositoryResult<(Vec<SemesterRegistration>, i64)>;

    async fn update_semester_registration(
        &self,
        id: SemesterRegistrationId,
        dto: &UpdateSemesterRegistrationDto,
    ) -> RepositoryResult<Option<SemesterRegistration>>;
}

/// The schedule a faculty member carries within one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub semester_registration_id: SemesterRegistrationId,
    pub faculty_id: FacultyId,
}

/// Offerings under a [`ScheduleKey`] meeting on any of `days`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub key: ScheduleKey,
    pub days: Vec<Day>,
    /// Leave this offering out, used when re-checking an offering against its siblings.
    pub exclude: Option<OfferedCourseId>,
}

#[async_trait]
pub trait OfferedCourseStore:
    CatalogStore + FindOne<ById<OfferedCourse>> + FindOne<OfferingSlot>
{
    async fn list_offered_courses(
        &self,
        filter: &OfferedCourseFilterParams,
    ) -> RepositoryResult<(Vec<OfferedCourse>, i64)>;

    /// Opens a write unit that serializes schedule changes for `key`.
    ///
    /// Concurrent units for the same key do not overlap: the second waits until
    /// the first commits or rolls back.
    async fn begin_schedule_write(
        &self,
        key: ScheduleKey,
    ) -> RepositoryResult<Box<dyn ScheduleWrite>>;
}

/// A read-check-write unit over one faculty member's schedule.
///
/// Nothing written through the unit is visible to others until [`commit`](Self::commit).
/// Dropping the unit without committing discards its writes.
#[async_trait]
pub trait ScheduleWrite: Send {
    /// Current state of an offering, locked against other writers until the unit ends.
    async fn lock_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>>;

    /// Registration status, held steady until the unit ends.
    async fn registration_status(
        &mut self,
        id: SemesterRegistrationId,
    ) -> RepositoryResult<Option<RegistrationStatus>>;

    async fn assigned_schedules(&mut self, query: &ScheduleQuery) -> RepositoryResult<Vec<Schedule>>;

    async fn insert_offered_course(
        &mut self,
        new: &NewOfferedCourse,
    ) -> RepositoryResult<OfferedCourse>;

    async fn update_offered_course(
        &mut self,
        id: OfferedCourseId,
        patch: &OfferedCoursePatch,
    ) -> RepositoryResult<Option<OfferedCourse>>;

    async fn delete_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>>;

    async fn commit(self: Box<Self>) -> RepositoryResult<()>;

    async fn rollback(self: Box<Self>) -> RepositoryResult<()>;
}

#[async_trait]
pub trait AccountStore:
    FindOne<ById<AcademicSemester>> + FindOne<ById<AcademicDepartment>>
{
    async fn begin_account_transaction(&self) -> RepositoryResult<Box<dyn AccountTransaction>>;
}

/// One atomic user-plus-profile creation.
///
/// Inserts return `None` when the store declines the record (for example a
/// duplicate login id or email). Nothing is visible to other readers before
/// [`commit`](Self::commit).
#[async_trait]
pub trait AccountTransaction: Send {
    /// Next value of the login-id counter for `scope`, starting at 1.
    async fn next_login_sequence(&mut self, scope: &str) -> RepositoryResult<i64>;

    async fn insert_user(&mut self, user: &NewUser) -> RepositoryResult<Option<User>>;

    async fn insert_student(
        &mut self,
        owner: &ProfileOwner,
        profile: &StudentProfileDto,
    ) -> RepositoryResult<Option<Student>>;

    async fn insert_faculty(
        &mut self,
        owner: &ProfileOwner,
        profile: &FacultyProfileDto,
    ) -> RepositoryResult<Option<Faculty>>;

    async fn insert_admin(
        &mut self,
        owner: &ProfileOwner,
        profile: &AdminProfileDto,
    ) -> RepositoryResult<Option<Admin>>;

    async fn commit(self: Box<Self>) -> RepositoryResult<()>;

    async fn rollback(self: Box<Self>) -> RepositoryResult<()>;
}

/// Every store capability the application uses.
pub trait CampusStore: OfferedCourseStore + AccountStore {}

impl<T> CampusStore for T where T: OfferedCourseStore + AccountStore {}
