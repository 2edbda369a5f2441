//! PostgreSQL store built on SQLx runtime queries.
//!
//! Offering writes take a transaction-scoped advisory lock on the
//! (registration, faculty) pair before reading the faculty's schedule, so
//! two concurrent writers for the same instructor cannot both pass the
//! conflict check. The `(semester_registration_id, course_id, section)`
//! triple is additionally protected by a unique constraint.

mod accounts;
mod catalog;
mod offered_courses;

use async_trait::async_trait;
use campusbyte_models::academic::{AcademicDepartment, AcademicFaculty, AcademicSemester};
use campusbyte_models::courses::{Course, CourseFacultyLink};
use campusbyte_models::offered_courses::OfferedCourse;
use campusbyte_models::semester_registrations::SemesterRegistration;
use campusbyte_models::users::Faculty;
use sqlx::PgPool;

use crate::error::RepositoryResult;
use crate::lookup::{ById, EligibleFaculty, FindOne, OfferingSlot, OpenRegistration};

pub(crate) const SEMESTER_COLUMNS: &str =
    "id, name, code, year, start_month, end_month, created_at, updated_at";
pub(crate) const ACADEMIC_FACULTY_COLUMNS: &str = "id, name, created_at, updated_at";
pub(crate) const DEPARTMENT_COLUMNS: &str =
    "id, name, academic_faculty_id, created_at, updated_at";
pub(crate) const COURSE_COLUMNS: &str =
    "id, title, prefix, code, credits, created_at, updated_at";
pub(crate) const REGISTRATION_COLUMNS: &str = "id, academic_semester_id, status, start_date, end_date, min_credit, max_credit, created_at, updated_at";
pub(crate) const OFFERED_COURSE_COLUMNS: &str = "id, semester_registration_id, academic_semester_id, academic_faculty_id, academic_department_id, course_id, faculty_id, section, max_capacity, days, start_time, end_time, created_at, updated_at";
pub(crate) const FACULTY_COLUMNS: &str = "id, login_id, user_id, designation, first_name, middle_name, last_name, gender, date_of_birth, email, contact_no, emergency_contact_no, present_address, permanent_address, academic_department_id, is_deleted, created_at, updated_at";

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Implements `FindOne<ById<T>>` with a primary-key select on `table`.
macro_rules! find_by_id {
    ($record:ty, $table:literal, $columns:expr) => {
        #[async_trait]
        impl FindOne<ById<$record>> for PgStore {
            async fn find_one(&self, lookup: &ById<$record>) -> RepositoryResult<Option<$record>> {
                let sql = format!("SELECT {} FROM {} WHERE id = $1", $columns, $table);
                let record = sqlx::query_as::<_, $record>(&sql)
                    .bind(lookup.id())
                    .fetch_optional(&self.pool)
                    .await?;
                Ok(record)
            }
        }
    };
}

find_by_id!(AcademicSemester, "academic_semesters", SEMESTER_COLUMNS);
find_by_id!(AcademicFaculty, "academic_faculties", ACADEMIC_FACULTY_COLUMNS);
find_by_id!(AcademicDepartment, "academic_departments", DEPARTMENT_COLUMNS);
find_by_id!(Course, "courses", COURSE_COLUMNS);
find_by_id!(SemesterRegistration, "semester_registrations", REGISTRATION_COLUMNS);
find_by_id!(OfferedCourse, "offered_courses", OFFERED_COURSE_COLUMNS);

#[async_trait]
impl FindOne<ById<Faculty>> for PgStore {
    async fn find_one(&self, lookup: &ById<Faculty>) -> RepositoryResult<Option<Faculty>> {
        let sql = format!(
            "SELECT {} FROM faculties WHERE id = $1 AND is_deleted = FALSE",
            FACULTY_COLUMNS
        );
        let faculty = sqlx::query_as::<_, Faculty>(&sql)
            .bind(lookup.id())
            .fetch_optional(&self.pool)
            .await?;
        Ok(faculty)
    }
}

#[async_trait]
impl FindOne<EligibleFaculty> for PgStore {
    async fn find_one(&self, lookup: &EligibleFaculty) -> RepositoryResult<Option<CourseFacultyLink>> {
        let link = sqlx::query_as::<_, CourseFacultyLink>(
            r#"SELECT course_id, faculty_id FROM course_faculties
               WHERE course_id = $1 AND faculty_id = $2"#,
        )
        .bind(lookup.course_id)
        .bind(lookup.faculty_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(link)
    }
}

#[async_trait]
impl FindOne<OfferingSlot> for PgStore {
    async fn find_one(&self, lookup: &OfferingSlot) -> RepositoryResult<Option<OfferedCourse>> {
        let sql = format!(
            "SELECT {} FROM offered_courses WHERE semester_registration_id = $1 AND course_id = $2 AND section = $3",
            OFFERED_COURSE_COLUMNS
        );
        let offered = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(lookup.semester_registration_id)
            .bind(lookup.course_id)
            .bind(&lookup.section)
            .fetch_optional(&self.pool)
            .await?;
        Ok(offered)
    }
}

#[async_trait]
impl FindOne<OpenRegistration> for PgStore {
    async fn find_one(
        &self,
        _lookup: &OpenRegistration,
    ) -> RepositoryResult<Option<SemesterRegistration>> {
        let sql = format!(
            "SELECT {} FROM semester_registrations WHERE status IN ('UPCOMING', 'ONGOING') ORDER BY created_at LIMIT 1",
            REGISTRATION_COLUMNS
        );
        let registration = sqlx::query_as::<_, SemesterRegistration>(&sql)
            .fetch_optional(&self.pool)
            .await?;
        Ok(registration)
    }
}
