//! Semester registrations module.
//!
//! A registration's status moves forward only: UPCOMING, then ONGOING, then
//! ENDED. At most one registration may be UPCOMING or ONGOING at a time, and
//! each academic semester has at most one registration.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
