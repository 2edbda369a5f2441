pub mod academic_departments;
pub mod academic_faculties;
pub mod academic_semesters;
pub mod courses;
pub mod offered_courses;
pub mod semester_registrations;
pub mod users;
