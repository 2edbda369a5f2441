//! Weekly schedule overlap detection.

use campusbyte_models::offered_courses::normalize_days;

use crate::modules::offered_courses::model::{OfferedCourse, OfferedCoursePatch, Schedule};

/// Returns true when `candidate` overlaps any of `existing`.
///
/// Two schedules overlap when they share at least one day and their time
/// windows intersect. Windows are half-open, so one class ending at 10:00 and
/// another starting at 10:00 do not overlap.
pub fn has_time_conflict(existing: &[Schedule], candidate: &Schedule) -> bool {
    existing.iter().any(|assigned| {
        assigned.shares_day_with(candidate)
            && candidate.start_time.minutes() < assigned.end_time.minutes()
            && assigned.start_time.minutes() < candidate.end_time.minutes()
    })
}

/// Whether applying `patch` moves the offering to a different faculty member
/// or a different weekly slot.
///
/// Fields are compared by value, so resubmitting the current days in another
/// order is not a change.
pub fn schedule_changed(current: &OfferedCourse, patch: &OfferedCoursePatch) -> bool {
    let faculty = patch.faculty_id.is_some_and(|id| id != current.faculty_id);
    let days = patch
        .days
        .as_ref()
        .is_some_and(|days| normalize_days(days.clone()) != current.schedule().days);
    let start = patch.start_time.is_some_and(|t| t != current.start_time);
    let end = patch.end_time.is_some_and(|t| t != current.end_time);

    faculty || days || start || end
}
