pub use campusbyte_models::academic::{
    AcademicDepartment, AcademicDepartmentFilterParams, CreateAcademicDepartmentDto,
    PaginatedAcademicDepartmentsResponse,
};
