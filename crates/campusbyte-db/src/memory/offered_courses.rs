use std::sync::Arc;
use std::sync::atomic::Ordering;

use async_trait::async_trait;
use campusbyte_models::ids::{OfferedCourseId, SemesterRegistrationId};
use campusbyte_models::offered_courses::{
    NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams, OfferedCoursePatch, Schedule,
};
use campusbyte_models::value_types::RegistrationStatus;
use chrono::Utc;
use tokio::sync::OwnedMutexGuard;

use super::{Inner, MemoryStore, paginate};
use crate::error::{RepositoryError, RepositoryResult};
use crate::repository::{OfferedCourseStore, ScheduleKey, ScheduleQuery, ScheduleWrite};

const SECTION_CONSTRAINT: &str = "unique_offered_course_section";

#[async_trait]
impl OfferedCourseStore for MemoryStore {
    async fn list_offered_courses(
        &self,
        filter: &OfferedCourseFilterParams,
    ) -> RepositoryResult<(Vec<OfferedCourse>, i64)> {
        let state = self.inner.read()?;
        let offered: Vec<&OfferedCourse> = state
            .offered_courses
            .iter()
            .rev()
            .filter(|o| {
                filter
                    .semester_registration_id
                    .is_none_or(|id| o.semester_registration_id == id)
            })
            .filter(|o| filter.faculty_id.is_none_or(|id| o.faculty_id == id))
            .filter(|o| filter.course_id.is_none_or(|id| o.course_id == id))
            .filter(|o| {
                filter
                    .academic_department_id
                    .is_none_or(|id| o.academic_department_id == id)
            })
            .collect();
        Ok(paginate(
            offered,
            filter.pagination.limit(),
            filter.pagination.offset(),
        ))
    }

    async fn begin_schedule_write(
        &self,
        key: ScheduleKey,
    ) -> RepositoryResult<Box<dyn ScheduleWrite>> {
        let guard = Arc::clone(&self.inner.schedule_lock).lock_owned().await;
        tracing::trace!(
            semester_registration_id = %key.semester_registration_id,
            faculty_id = %key.faculty_id,
            "Schedule write unit opened"
        );
        Ok(Box::new(MemoryScheduleWrite {
            inner: Arc::clone(&self.inner),
            _guard: guard,
            staged: Vec::new(),
            removed: Vec::new(),
        }))
    }
}

/// Writes are staged on the unit and applied to the shared state on commit.
///
/// The store-wide schedule lock is held for the lifetime of the unit.
struct MemoryScheduleWrite {
    inner: Arc<Inner>,
    _guard: OwnedMutexGuard<()>,
    /// Inserted or updated rows, latest version last.
    staged: Vec<OfferedCourse>,
    removed: Vec<OfferedCourseId>,
}

impl MemoryScheduleWrite {
    /// Committed offerings with this unit's staged rows laid over them.
    fn visible(&self) -> RepositoryResult<Vec<OfferedCourse>> {
        let state = self.inner.read()?;
        let mut rows = state.offered_courses.clone();
        for staged in &self.staged {
            match rows.iter_mut().find(|o| o.id == staged.id) {
                Some(row) => *row = staged.clone(),
                None => rows.push(staged.clone()),
            }
        }
        rows.retain(|o| !self.removed.contains(&o.id));
        Ok(rows)
    }

    fn stage(&mut self, row: OfferedCourse) {
        self.staged.retain(|o| o.id != row.id);
        self.staged.push(row);
    }
}

#[async_trait]
impl ScheduleWrite for MemoryScheduleWrite {
    async fn lock_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        // The store-wide schedule lock already excludes other writers.
        Ok(self.visible()?.into_iter().find(|o| o.id == id))
    }

    async fn registration_status(
        &mut self,
        id: SemesterRegistrationId,
    ) -> RepositoryResult<Option<RegistrationStatus>> {
        let state = self.inner.read()?;
        Ok(state
            .semester_registrations
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.status))
    }

    async fn assigned_schedules(&mut self, query: &ScheduleQuery) -> RepositoryResult<Vec<Schedule>> {
        self.inner.schedule_queries.fetch_add(1, Ordering::SeqCst);
        let schedules = self
            .visible()?
            .into_iter()
            .filter(|o| {
                o.semester_registration_id == query.key.semester_registration_id
                    && o.faculty_id == query.key.faculty_id
                    && query.exclude != Some(o.id)
                    && o.days.iter().any(|day| query.days.contains(day))
            })
            .map(|o| o.schedule())
            .collect();
        Ok(schedules)
    }

    async fn insert_offered_course(
        &mut self,
        new: &NewOfferedCourse,
    ) -> RepositoryResult<OfferedCourse> {
        let taken = self.visible()?.iter().any(|o| {
            o.semester_registration_id == new.semester_registration_id
                && o.course_id == new.course_id
                && o.section == new.section
        });
        if taken {
            return Err(RepositoryError::UniqueViolation(SECTION_CONSTRAINT.to_string()));
        }

        let now = Utc::now();
        let offered = OfferedCourse {
            id: OfferedCourseId::new(),
            semester_registration_id: new.semester_registration_id,
            academic_semester_id: new.academic_semester_id,
            academic_faculty_id: new.academic_faculty_id,
            academic_department_id: new.academic_department_id,
            course_id: new.course_id,
            faculty_id: new.faculty_id,
            section: new.section.clone(),
            max_capacity: new.max_capacity,
            days: new.schedule.days.clone(),
            start_time: new.schedule.start_time,
            end_time: new.schedule.end_time,
            created_at: now,
            updated_at: now,
        };
        self.stage(offered.clone());
        Ok(offered)
    }

    async fn update_offered_course(
        &mut self,
        id: OfferedCourseId,
        patch: &OfferedCoursePatch,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        let Some(mut offered) = self.visible()?.into_iter().find(|o| o.id == id) else {
            return Ok(None);
        };

        if let Some(faculty_id) = patch.faculty_id {
            offered.faculty_id = faculty_id;
        }
        if let Some(max_capacity) = patch.max_capacity {
            offered.max_capacity = max_capacity;
        }
        if let Some(days) = &patch.days {
            offered.days = days.clone();
        }
        if let Some(start_time) = patch.start_time {
            offered.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            offered.end_time = end_time;
        }
        offered.updated_at = Utc::now();

        self.stage(offered.clone());
        Ok(Some(offered))
    }

    async fn delete_offered_course(
        &mut self,
        id: OfferedCourseId,
    ) -> RepositoryResult<Option<OfferedCourse>> {
        let Some(offered) = self.visible()?.into_iter().find(|o| o.id == id) else {
            return Ok(None);
        };
        self.staged.retain(|o| o.id != id);
        self.removed.push(id);
        Ok(Some(offered))
    }

    async fn commit(self: Box<Self>) -> RepositoryResult<()> {
        let this = *self;
        let mut state = this.inner.write()?;
        for staged in this.staged {
            match state.offered_courses.iter_mut().find(|o| o.id == staged.id) {
                Some(row) => *row = staged,
                None => state.offered_courses.push(staged),
            }
        }
        state
            .offered_courses
            .retain(|o| !this.removed.contains(&o.id));
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> RepositoryResult<()> {
        Ok(())
    }
}
