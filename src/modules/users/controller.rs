use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use campusbyte_core::{AppError, ErrorResponse};

use crate::modules::users::model::{
    AdminAccount, CreateAdminRequest, CreateFacultyRequest, CreateStudentRequest, FacultyAccount,
    StudentAccount,
};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Create a student account
#[utoipa::path(
    post,
    path = "/api/users/create-student",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student account created", body = StudentAccount),
        (status = 400, description = "User or student could not be created", body = ErrorResponse),
        (status = 404, description = "Admission semester or academic department not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, request))]
pub async fn create_student(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentAccount>), AppError> {
    let account = UserService::create_student(
        state.store.as_ref(),
        &state.provisioning,
        request.password.as_deref(),
        request.student,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Create a faculty account
#[utoipa::path(
    post,
    path = "/api/users/create-faculty",
    request_body = CreateFacultyRequest,
    responses(
        (status = 201, description = "Faculty account created", body = FacultyAccount),
        (status = 400, description = "User or faculty could not be created", body = ErrorResponse),
        (status = 404, description = "Academic department not found", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, request))]
pub async fn create_faculty(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateFacultyRequest>,
) -> Result<(StatusCode, Json<FacultyAccount>), AppError> {
    let account = UserService::create_faculty(
        state.store.as_ref(),
        &state.provisioning,
        request.password.as_deref(),
        request.faculty,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Create an admin account
#[utoipa::path(
    post,
    path = "/api/users/create-admin",
    request_body = CreateAdminRequest,
    responses(
        (status = 201, description = "Admin account created", body = AdminAccount),
        (status = 400, description = "User or admin could not be created", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    ),
    tag = "Users"
)]
#[instrument(skip(state, request))]
pub async fn create_admin(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateAdminRequest>,
) -> Result<(StatusCode, Json<AdminAccount>), AppError> {
    let account = UserService::create_admin(
        state.store.as_ref(),
        &state.provisioning,
        request.password.as_deref(),
        request.admin,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(account)))
}
