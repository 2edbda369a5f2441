pub use campusbyte_models::courses::{
    AssignCourseFacultiesDto, Course, CourseFacultiesResponse, CreateCourseDto,
    PaginatedCoursesResponse, UpdateCourseDto,
};
