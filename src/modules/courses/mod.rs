//! Courses module.
//!
//! Besides the catalog itself this module owns the course-faculty mapping:
//! the list of faculty members eligible to teach a course. Offerings can only
//! be assigned to an eligible faculty member.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
