pub use campusbyte_models::academic::{
    AcademicSemester, CreateAcademicSemesterDto, PaginatedAcademicSemestersResponse,
};
