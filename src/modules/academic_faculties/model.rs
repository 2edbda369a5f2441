pub use campusbyte_models::academic::{
    AcademicFaculty, CreateAcademicFacultyDto, PaginatedAcademicFacultiesResponse,
};
