//! Academic semesters module.
//!
//! A semester is a named period of an academic year (Autumn, Summer, Fall)
//! with a fixed two-digit code. Student login ids are derived from the
//! admission semester's year and code.

pub mod controller;
pub mod model;
pub mod router;
pub mod service;
