use async_trait::async_trait;
use campusbyte_models::academic::{
    AcademicDepartment, AcademicDepartmentFilterParams, AcademicFaculty, AcademicSemester,
    CreateAcademicDepartmentDto, CreateAcademicFacultyDto, CreateAcademicSemesterDto,
};
use campusbyte_models::courses::{Course, CreateCourseDto, UpdateCourseDto};
use campusbyte_models::ids::{CourseId, FacultyId, SemesterRegistrationId};
use campusbyte_models::semester_registrations::{
    NewSemesterRegistration, SemesterRegistration, SemesterRegistrationFilterParams,
    UpdateSemesterRegistrationDto,
};

use super::{
    ACADEMIC_FACULTY_COLUMNS, COURSE_COLUMNS, DEPARTMENT_COLUMNS, PgStore, REGISTRATION_COLUMNS,
    SEMESTER_COLUMNS,
};
use crate::error::RepositoryResult;
use crate::repository::CatalogStore;

#[async_trait]
impl CatalogStore for PgStore {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let one = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(one == 1)
    }

    async fn insert_academic_semester(
        &self,
        dto: &CreateAcademicSemesterDto,
    ) -> RepositoryResult<AcademicSemester> {
        let sql = format!(
            r#"INSERT INTO academic_semesters (name, code, year, start_month, end_month)
               VALUES ($1, $2, $3, $4, $5)
               RETURNING {}"#,
            SEMESTER_COLUMNS
        );
        let semester = sqlx::query_as::<_, AcademicSemester>(&sql)
            .bind(dto.name)
            .bind(dto.code)
            .bind(dto.year)
            .bind(dto.start_month)
            .bind(dto.end_month)
            .fetch_one(&self.pool)
            .await?;
        Ok(semester)
    }

    async fn list_academic_semesters(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicSemester>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM academic_semesters")
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "SELECT {} FROM academic_semesters ORDER BY year DESC, code LIMIT $1 OFFSET $2",
            SEMESTER_COLUMNS
        );
        let semesters = sqlx::query_as::<_, AcademicSemester>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((semesters, total))
    }

    async fn insert_academic_faculty(
        &self,
        dto: &CreateAcademicFacultyDto,
    ) -> RepositoryResult<AcademicFaculty> {
        let sql = format!(
            "INSERT INTO academic_faculties (name) VALUES ($1) RETURNING {}",
            ACADEMIC_FACULTY_COLUMNS
        );
        let faculty = sqlx::query_as::<_, AcademicFaculty>(&sql)
            .bind(dto.name.trim())
            .fetch_one(&self.pool)
            .await?;
        Ok(faculty)
    }

    async fn list_academic_faculties(
        &self,
        limit: i64,
        offset: i64,
    ) -> RepositoryResult<(Vec<AcademicFaculty>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM academic_faculties")
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "SELECT {} FROM academic_faculties ORDER BY name LIMIT $1 OFFSET $2",
            ACADEMIC_FACULTY_COLUMNS
        );
        let faculties = sqlx::query_as::<_, AcademicFaculty>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((faculties, total))
    }

    async fn insert_academic_department(
        &self,
        dto: &CreateAcademicDepartmentDto,
    ) -> RepositoryResult<AcademicDepartment> {
        let sql = format!(
            r#"INSERT INTO academic_departments (name, academic_faculty_id)
               VALUES ($1, $2)
               RETURNING {}"#,
            DEPARTMENT_COLUMNS
        );
        let department = sqlx::query_as::<_, AcademicDepartment>(&sql)
            .bind(dto.name.trim())
            .bind(dto.academic_faculty_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(department)
    }

    async fn list_academic_departments(
        &self,
        filter: &AcademicDepartmentFilterParams,
    ) -> RepositoryResult<(Vec<AcademicDepartment>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM academic_departments
               WHERE ($1::uuid IS NULL OR academic_faculty_id = $1)"#,
        )
        .bind(filter.academic_faculty_id)
        .fetch_one(&self.pool)
        .await?;
        let sql = format!(
            r#"SELECT {} FROM academic_departments
               WHERE ($1::uuid IS NULL OR academic_faculty_id = $1)
               ORDER BY name LIMIT $2 OFFSET $3"#,
            DEPARTMENT_COLUMNS
        );
        let departments = sqlx::query_as::<_, AcademicDepartment>(&sql)
            .bind(filter.academic_faculty_id)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok((departments, total))
    }

    async fn insert_course(&self, dto: &CreateCourseDto) -> RepositoryResult<Course> {
        let sql = format!(
            r#"INSERT INTO courses (title, prefix, code, credits)
               VALUES ($1, $2, $3, $4)
               RETURNING {}"#,
            COURSE_COLUMNS
        );
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(dto.title.trim())
            .bind(dto.prefix.trim())
            .bind(dto.code)
            .bind(dto.credits)
            .fetch_one(&self.pool)
            .await?;
        Ok(course)
    }

    async fn list_courses(&self, limit: i64, offset: i64) -> RepositoryResult<(Vec<Course>, i64)> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
            .fetch_one(&self.pool)
            .await?;
        let sql = format!(
            "SELECT {} FROM courses ORDER BY prefix, code LIMIT $1 OFFSET $2",
            COURSE_COLUMNS
        );
        let courses = sqlx::query_as::<_, Course>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok((courses, total))
    }

    async fn update_course(
        &self,
        id: CourseId,
        dto: &UpdateCourseDto,
    ) -> RepositoryResult<Option<Course>> {
        let sql = format!(
            r#"UPDATE courses SET
                   title = COALESCE($2, title),
                   prefix = COALESCE($3, prefix),
                   code = COALESCE($4, code),
                   credits = COALESCE($5, credits),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            COURSE_COLUMNS
        );
        let course = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .bind(dto.title.as_deref().map(str::trim))
            .bind(dto.prefix.as_deref().map(str::trim))
            .bind(dto.code)
            .bind(dto.credits)
            .fetch_optional(&self.pool)
            .await?;
        Ok(course)
    }

    async fn delete_course(&self, id: CourseId) -> RepositoryResult<Option<Course>> {
        // Eligibility rows go with the course; offerings block it.
        let sql = format!(
            "DELETE FROM courses WHERE id = $1 RETURNING {}",
            COURSE_COLUMNS
        );
        let deleted = sqlx::query_as::<_, Course>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(deleted)
    }

    async fn add_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>> {
        sqlx::query(
            r#"INSERT INTO course_faculties (course_id, faculty_id)
               SELECT $1, UNNEST($2::uuid[])
               ON CONFLICT (course_id, faculty_id) DO NOTHING"#,
        )
        .bind(course_id)
        .bind(faculties)
        .execute(&self.pool)
        .await?;

        self.course_faculties(course_id).await
    }

    async fn remove_course_faculties(
        &self,
        course_id: CourseId,
        faculties: &[FacultyId],
    ) -> RepositoryResult<Vec<FacultyId>> {
        sqlx::query("DELETE FROM course_faculties WHERE course_id = $1 AND faculty_id = ANY($2)")
            .bind(course_id)
            .bind(faculties)
            .execute(&self.pool)
            .await?;

        self.course_faculties(course_id).await
    }

    async fn course_faculties(&self, course_id: CourseId) -> RepositoryResult<Vec<FacultyId>> {
        let faculties = sqlx::query_scalar::<_, FacultyId>(
            "SELECT faculty_id FROM course_faculties WHERE course_id = $1 ORDER BY created_at, faculty_id",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(faculties)
    }

    async fn insert_semester_registration(
        &self,
        new: &NewSemesterRegistration,
    ) -> RepositoryResult<SemesterRegistration> {
        let sql = format!(
            r#"INSERT INTO semester_registrations
                   (academic_semester_id, status, start_date, end_date, min_credit, max_credit)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {}"#,
            REGISTRATION_COLUMNS
        );
        let registration = sqlx::query_as::<_, SemesterRegistration>(&sql)
            .bind(new.academic_semester_id)
            .bind(new.status)
            .bind(new.start_date)
            .bind(new.end_date)
            .bind(new.min_credit)
            .bind(new.max_credit)
            .fetch_one(&self.pool)
            .await?;
        Ok(registration)
    }

    async fn list_semester_registrations(
        &self,
        filter: &SemesterRegistrationFilterParams,
    ) -> RepositoryResult<(Vec<SemesterRegistration>, i64)> {
        let total = sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM semester_registrations
               WHERE ($1::text IS NULL OR status = $1)
                 AND ($2::uuid IS NULL OR academic_semester_id = $2)"#,
        )
        .bind(filter.status)
        .bind(filter.academic_semester_id)
        .fetch_one(&self.pool)
        .await?;
        let sql = format!(
            r#"SELECT {} FROM semester_registrations
               WHERE ($1::text IS NULL OR status = $1)
                 AND ($2::uuid IS NULL OR academic_semester_id = $2)
               ORDER BY created_at DESC LIMIT $3 OFFSET $4"#,
            REGISTRATION_COLUMNS
        );
        let registrations = sqlx::query_as::<_, SemesterRegistration>(&sql)
            .bind(filter.status)
            .bind(filter.academic_semester_id)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(&self.pool)
            .await?;
        Ok((registrations, total))
    }

    async fn update_semester_registration(
        &self,
        id: SemesterRegistrationId,
        dto: &UpdateSemesterRegistrationDto,
    ) -> RepositoryResult<Option<SemesterRegistration>> {
        let sql = format!(
            r#"UPDATE semester_registrations SET
                   status = COALESCE($2, status),
                   start_date = COALESCE($3, start_date),
                   end_date = COALESCE($4, end_date),
                   min_credit = COALESCE($5, min_credit),
                   max_credit = COALESCE($6, max_credit),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            REGISTRATION_COLUMNS
        );
        let registration = sqlx::query_as::<_, SemesterRegistration>(&sql)
            .bind(id)
            .bind(dto.status)
            .bind(dto.start_date)
            .bind(dto.end_date)
            .bind(dto.min_credit)
            .bind(dto.max_credit)
            .fetch_optional(&self.pool)
            .await?;
        Ok(registration)
    }
}
