//! In-process store.
//!
//! Keeps every table in memory behind a `RwLock`, mirroring the unique
//! constraints of the PostgreSQL schema so services behave the same against
//! either backend. Useful for tests and for running the API without a
//! database.
//!
//! ```ignore
//! use campusbyte_db::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let course = store.insert_course(&dto).await?;
//! assert_eq!(store.courses().len(), 1);
//! ```

mod accounts;
mod catalog;
mod offered_courses;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use campusbyte_models::academic::{AcademicDepartment, AcademicFaculty, AcademicSemester};
use campusbyte_models::courses::{Course, CourseFacultyLink};
use campusbyte_models::ids::{CourseId, FacultyId};
use campusbyte_models::offered_courses::OfferedCourse;
use campusbyte_models::semester_registrations::SemesterRegistration;
use campusbyte_models::users::{Admin, Faculty, Student, User};
use tokio::sync::Mutex;

use crate::error::{RepositoryError, RepositoryResult};
use crate::lookup::{ById, EligibleFaculty, FindOne, OfferingSlot, OpenRegistration};

#[derive(Default)]
pub(crate) struct MemoryState {
    pub(crate) academic_semesters: Vec<AcademicSemester>,
    pub(crate) academic_faculties: Vec<AcademicFaculty>,
    pub(crate) academic_departments: Vec<AcademicDepartment>,
    pub(crate) courses: Vec<Course>,
    pub(crate) course_faculties: Vec<(CourseId, FacultyId)>,
    pub(crate) semester_registrations: Vec<SemesterRegistration>,
    pub(crate) offered_courses: Vec<OfferedCourse>,
    pub(crate) users: Vec<User>,
    pub(crate) students: Vec<Student>,
    pub(crate) faculties: Vec<Faculty>,
    pub(crate) admins: Vec<Admin>,
    pub(crate) login_sequences: HashMap<String, i64>,
}

pub(crate) struct Inner {
    state: RwLock<MemoryState>,
    /// Held by an open schedule write unit.
    schedule_lock: Arc<Mutex<()>>,
    /// Held by an open account transaction.
    account_lock: Arc<Mutex<()>>,
    schedule_queries: AtomicUsize,
}

impl Inner {
    pub(crate) fn read(&self) -> RepositoryResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_| RepositoryError::Internal("memory store lock poisoned".into()))
    }

    pub(crate) fn write(&self) -> RepositoryResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_| RepositoryError::Internal("memory store lock poisoned".into()))
    }
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                state: RwLock::new(MemoryState::default()),
                schedule_lock: Arc::new(Mutex::new(())),
                account_lock: Arc::new(Mutex::new(())),
                schedule_queries: AtomicUsize::new(0),
            }),
        }
    }

    /// Number of times a faculty schedule has been read for a conflict check.
    pub fn schedule_query_count(&self) -> usize {
        self.inner.schedule_queries.load(Ordering::SeqCst)
    }

    fn snapshot<T>(&self, pick: impl FnOnce(&MemoryState) -> Vec<T>) -> Vec<T> {
        let state = self
            .inner
            .state
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        pick(&state)
    }

    pub fn users(&self) -> Vec<User> {
        self.snapshot(|s| s.users.clone())
    }

    pub fn students(&self) -> Vec<Student> {
        self.snapshot(|s| s.students.clone())
    }

    pub fn faculties(&self) -> Vec<Faculty> {
        self.snapshot(|s| s.faculties.clone())
    }

    pub fn admins(&self) -> Vec<Admin> {
        self.snapshot(|s| s.admins.clone())
    }

    pub fn courses(&self) -> Vec<Course> {
        self.snapshot(|s| s.courses.clone())
    }

    pub fn offered_courses(&self) -> Vec<OfferedCourse> {
        self.snapshot(|s| s.offered_courses.clone())
    }

    pub fn semester_registrations(&self) -> Vec<SemesterRegistration> {
        self.snapshot(|s| s.semester_registrations.clone())
    }
}

/// Applies `limit`/`offset` to an already ordered list and returns it with the total.
pub(crate) fn paginate<T: Clone>(items: Vec<&T>, limit: i64, offset: i64) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let page = items
        .into_iter()
        .skip(offset.max(0) as usize)
        .take(limit.max(0) as usize)
        .cloned()
        .collect();
    (page, total)
}

macro_rules! find_by_id {
    ($record:ty, $table:ident) => {
        #[async_trait]
        impl FindOne<ById<$record>> for MemoryStore {
            async fn find_one(&self, lookup: &ById<$record>) -> RepositoryResult<Option<$record>> {
                let state = self.inner.read()?;
                Ok(state.$table.iter().find(|r| r.id == lookup.id()).cloned())
            }
        }
    };
}

find_by_id!(AcademicSemester, academic_semesters);
find_by_id!(AcademicFaculty, academic_faculties);
find_by_id!(AcademicDepartment, academic_departments);
find_by_id!(Course, courses);
find_by_id!(SemesterRegistration, semester_registrations);
find_by_id!(OfferedCourse, offered_courses);

#[async_trait]
impl FindOne<ById<Faculty>> for MemoryStore {
    async fn find_one(&self, lookup: &ById<Faculty>) -> RepositoryResult<Option<Faculty>> {
        let state = self.inner.read()?;
        Ok(state
            .faculties
            .iter()
            .find(|f| f.id == lookup.id() && !f.is_deleted)
            .cloned())
    }
}

#[async_trait]
impl FindOne<EligibleFaculty> for MemoryStore {
    async fn find_one(&self, lookup: &EligibleFaculty) -> RepositoryResult<Option<CourseFacultyLink>> {
        let state = self.inner.read()?;
        Ok(state
            .course_faculties
            .iter()
            .find(|(course_id, faculty_id)| {
                *course_id == lookup.course_id && *faculty_id == lookup.faculty_id
            })
            .map(|(course_id, faculty_id)| CourseFacultyLink {
                course_id: *course_id,
                faculty_id: *faculty_id,
            }))
    }
}

#[async_trait]
impl FindOne<OfferingSlot> for MemoryStore {
    async fn find_one(&self, lookup: &OfferingSlot) -> RepositoryResult<Option<OfferedCourse>> {
        let state = self.inner.read()?;
        Ok(state
            .offered_courses
            .iter()
            .find(|o| {
                o.semester_registration_id == lookup.semester_registration_id
                    && o.course_id == lookup.course_id
                    && o.section == lookup.section
            })
            .cloned())
    }
}

#[async_trait]
impl FindOne<OpenRegistration> for MemoryStore {
    async fn find_one(
        &self,
        _lookup: &OpenRegistration,
    ) -> RepositoryResult<Option<SemesterRegistration>> {
        let state = self.inner.read()?;
        Ok(state
            .semester_registrations
            .iter()
            .find(|r| r.status.allows_new_offerings())
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_reports_total() {
        let items = [1, 2, 3, 4, 5];
        let (page, total) = paginate(items.iter().collect(), 2, 3);
        assert_eq!(page, vec![4, 5]);
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_new_store_is_empty_and_uncounted() {
        let store = MemoryStore::new();
        assert!(store.users().is_empty());
        assert!(store.offered_courses().is_empty());
        assert_eq!(store.schedule_query_count(), 0);
    }
}
