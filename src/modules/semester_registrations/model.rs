pub use campusbyte_models::semester_registrations::{
    CreateSemesterRegistrationDto, NewSemesterRegistration,
    PaginatedSemesterRegistrationsResponse, SemesterRegistration,
    SemesterRegistrationFilterParams, UpdateSemesterRegistrationDto,
};
