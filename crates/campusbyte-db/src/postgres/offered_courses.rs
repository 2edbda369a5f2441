use async_trait::async_trait;
use campusbyte_models::ids::{OfferedCourseId, SemesterRegistrationId};
use campusbyte_models::offered_courses::{
    NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams, OfferedCoursePatch, Schedule,
};
use campusbyte_models::value_types::RegistrationStatus;
use sqlx::{Postgres, Transaction};

use super::{OFFERED_COURSE_COLUMNS, PgStore};
use crate::error::RepositoryResult;
use crate::repository::{OfferedCourseStore, ScheduleKey, ScheduleQuery, ScheduleWrite};

const OFFERED_COURSE_FILTER: &str = r#"($1::uuid IS NULL OR semester_registration_id = $1)
                 AND ($2::uuid IS NULL OR faculty_id = $2)
                 AND ($3::uuid IS NULL OR course_id = $3)
                 AND ($4::uuid IS NULL OR academic_department_id = $4)"#;

#[async_trait]
impl OfferedCourseStore for PgStore {
    async fn list_offered_courses(
        &self,
        filter: &OfferedCourseFilterParams,
    ) -> RepositoryResult<(Vec<OfferedCourse>, i64)> {
        let count_sql = format!(
            "SELECT COUNT(*) FROM offered_courses WHERE {}",
            OFFERED_COURSE_FILTER
        );
        let total = sqlx::query_scalar::<_, i64>(&count_sql)
            .bind(filter.semester_registration_id)
            .bind(filter.faculty_id)
            .bind(filter.course_id)
            .bind(filter.academic_department_id)
            .fetch_one(&self.pool)
            .await?;

        let sql = format!(
            r#"SELECT {} FROM offered_courses WHERE {}
               ORDER BY created_at DESC LIMIT $5 OFFSET $6"#,
            OFFERED_COURSE_COLUMNS, OFFERED_COURSE_FILTER
        );
        let offered = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(filter.semester_registration_id)
            .bind(filter.faculty_id)
            .bind(filter.course_id)
            .bind(filter.academic_department_id)
            .bind(filter.pagination.limit())
            .bind(filter.pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((offered, total))
    }

    async fn begin_schedule_write(
        &self,
        key: ScheduleKey,
    ) -> RepositoryResult<Box<dyn ScheduleWrite>> {
        let mut tx = self.pool.begin().await?;

        // Released automatically when the transaction ends.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1, 0))")
            .bind(format!("{}:{}", key.semester_registration_id, key.faculty_id))
            .execute(&mut *tx)
            .await?;

        Ok(Box::new(PgScheduleWrite { tx }))
    }
}

/// Schedule write unit holding the advisory lock for its key.
pub struct PgScheduleWrite {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ScheduleWrite for PgScheduleWrite {
    async fn lock_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        let sql = format!(
            "SELECT {} FROM offered_courses WHERE id = $1 FOR UPDATE",
            OFFERED_COURSE_COLUMNS
        );
        let offered = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(offered)
    }

    async fn registration_status(
        &mut self,
        id: SemesterRegistrationId,
    ) -> RepositoryResult<Option<RegistrationStatus>> {
        // FOR SHARE holds off status updates until this unit ends.
        let status = sqlx::query_scalar::<_, RegistrationStatus>(
            "SELECT status FROM semester_registrations WHERE id = $1 FOR SHARE",
        )
        .bind(id)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(status)
    }

    async fn assigned_schedules(&mut self, query: &ScheduleQuery) -> RepositoryResult<Vec<Schedule>> {
        let schedules = sqlx::query_as::<_, Schedule>(
            r#"SELECT days, start_time, end_time FROM offered_courses
               WHERE semester_registration_id = $1
                 AND faculty_id = $2
                 AND days && $3
                 AND ($4::uuid IS NULL OR id <> $4)"#,
        )
        .bind(query.key.semester_registration_id)
        .bind(query.key.faculty_id)
        .bind(query.days.as_slice())
        .bind(query.exclude)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(schedules)
    }

    async fn insert_offered_course(
        &mut self,
        new: &NewOfferedCourse,
    ) -> RepositoryResult<OfferedCourse> {
        let sql = format!(
            r#"INSERT INTO offered_courses
                   (semester_registration_id, academic_semester_id, academic_faculty_id,
                    academic_department_id, course_id, faculty_id, section, max_capacity,
                    days, start_time, end_time)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
               RETURNING {}"#,
            OFFERED_COURSE_COLUMNS
        );
        let offered = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(new.semester_registration_id)
            .bind(new.academic_semester_id)
            .bind(new.academic_faculty_id)
            .bind(new.academic_department_id)
            .bind(new.course_id)
            .bind(new.faculty_id)
            .bind(&new.section)
            .bind(new.max_capacity)
            .bind(new.schedule.days.as_slice())
            .bind(new.schedule.start_time)
            .bind(new.schedule.end_time)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(offered)
    }

    async fn update_offered_course(
        &mut self,
        id: OfferedCourseId,
        patch: &OfferedCoursePatch,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        let sql = format!(
            r#"UPDATE offered_courses SET
                   faculty_id = COALESCE($2, faculty_id),
                   max_capacity = COALESCE($3, max_capacity),
                   days = COALESCE($4, days),
                   start_time = COALESCE($5, start_time),
                   end_time = COALESCE($6, end_time),
                   updated_at = NOW()
               WHERE id = $1
               RETURNING {}"#,
            OFFERED_COURSE_COLUMNS
        );
        let offered = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(id)
            .bind(patch.faculty_id)
            .bind(patch.max_capacity)
            .bind(patch.days.as_deref())
            .bind(patch.start_time)
            .bind(patch.end_time)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(offered)
    }

    async fn delete_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        let sql = format!(
            "DELETE FROM offered_courses WHERE id = $1 RETURNING {}",
            OFFERED_COURSE_COLUMNS
        );
        let deleted = sqlx::query_as::<_, OfferedCourse>(&sql)
            .bind(id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(deleted)
    }

    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
