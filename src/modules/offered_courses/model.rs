//! Offered course models.
//!
//! This module re-exports the offering types from the `campusbyte-models` crate.

pub use campusbyte_models::offered_courses::{
    CreateOfferedCourseDto, NewOfferedCourse, OfferedCourse, OfferedCourseFilterParams,
    OfferedCoursePatch, PaginatedOfferedCoursesResponse, Schedule, UpdateOfferedCourseDto,
};
