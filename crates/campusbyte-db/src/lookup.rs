//! Single-record lookups.
//!
//! A [`Lookup`] describes a query that matches at most one record. Stores
//! advertise which lookups they can answer by implementing [`FindOne`] for
//! them, which lets callers write one generic existence check instead of a
//! helper per entity.
//!
//! ```ignore
//! use campusbyte_db::lookup::{ById, EligibleFaculty, FindOne};
//!
//! let course = store.find_one(&ById::<Course>::new(course_id)).await?;
//! let link = store
//!     .find_one(&EligibleFaculty { course_id, faculty_id })
//!     .await?;
//! ```

use std::fmt;

use async_trait::async_trait;
use campusbyte_models::academic::{AcademicDepartment, AcademicFaculty, AcademicSemester};
use campusbyte_models::courses::{Course, CourseFacultyLink};
use campusbyte_models::ids::{
    AcademicDepartmentId, AcademicFacultyId, AcademicSemesterId, CourseId, FacultyId,
    OfferedCourseId, SemesterRegistrationId,
};
use campusbyte_models::offered_courses::OfferedCourse;
use campusbyte_models::semester_registrations::SemesterRegistration;
use campusbyte_models::users::Faculty;

use crate::error::RepositoryResult;

/// A stored record addressable by its typed id.
pub trait Entity: Send + Sync + 'static {
    type Id: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    /// Human-readable name used in log fields.
    const NAME: &'static str;
}

macro_rules! entity {
    ($record:ty, $id:ty, $name:literal) => {
        impl Entity for $record {
            type Id = $id;
            const NAME: &'static str = $name;
        }
    };
}

entity!(AcademicSemester, AcademicSemesterId, "academic_semester");
entity!(AcademicFaculty, AcademicFacultyId, "academic_faculty");
entity!(AcademicDepartment, AcademicDepartmentId, "academic_department");
entity!(Course, CourseId, "course");
entity!(Faculty, FacultyId, "faculty");
entity!(SemesterRegistration, SemesterRegistrationId, "semester_registration");
entity!(OfferedCourse, OfferedCourseId, "offered_course");

/// A query matching at most one record.
pub trait Lookup: Send + Sync {
    type Record: Send;
}

/// Capability to answer a [`Lookup`].
#[async_trait]
pub trait FindOne<L: Lookup>: Send + Sync {
    async fn find_one(&self, lookup: &L) -> RepositoryResult<Option<L::Record>>;
}

/// Match by primary key.
pub struct ById<T: Entity>(pub T::Id);

impl<T: Entity> ById<T> {
    pub fn new(id: T::Id) -> Self {
        Self(id)
    }

    pub fn id(&self) -> T::Id {
        self.0
    }
}

impl<T: Entity> fmt::Debug for ById<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ById<{}>({:?})", T::NAME, self.0)
    }
}

impl<T: Entity> Lookup for ById<T> {
    type Record = T;
}

/// The eligibility row allowing `faculty_id` to teach `course_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibleFaculty {
    pub course_id: CourseId,
    pub faculty_id: FacultyId,
}

impl Lookup for EligibleFaculty {
    type Record = CourseFacultyLink;
}

/// The offering occupying a section of a course within a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferingSlot {
    pub semester_registration_id: SemesterRegistrationId,
    pub course_id: CourseId,
    pub section: String,
}

impl Lookup for OfferingSlot {
    type Record = OfferedCourse;
}

/// Any registration that is UPCOMING or ONGOING.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenRegistration;

impl Lookup for OpenRegistration {
    type Record = SemesterRegistration;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_id_debug_names_entity() {
        let lookup = ById::<Course>::new(CourseId::from_u128(1));
        let rendered = format!("{:?}", lookup);
        assert!(rendered.starts_with("ById<course>("));
        assert_eq!(lookup.id(), CourseId::from_u128(1));
    }
}
