//! Offered courses module.
//!
//! An offering is a course taught by one faculty member in one section of a
//! semester registration, on a weekly schedule. Offerings may be created until
//! the registration has ENDED, and changed or removed only while it is UPCOMING.
//!
//! Creating or rescheduling an offering checks the faculty member's other
//! offerings in the same registration for overlapping times. The check and
//! the write run inside one [`ScheduleWrite`](campusbyte_db::ScheduleWrite)
//! unit, so two requests cannot both book the same slot.

pub mod controller;
pub mod model;
pub mod router;
pub mod schedule;
pub mod service;
