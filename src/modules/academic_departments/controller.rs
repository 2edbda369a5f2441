use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::AppError;

use crate::modules::academic_departments::model::{
    AcademicDepartment, AcademicDepartmentFilterParams, CreateAcademicDepartmentDto,
    PaginatedAcademicDepartmentsResponse,
};
use crate::modules::academic_departments::service::AcademicDepartmentService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/academic-departments",
    summary = "Create academic department",
    request_body = CreateAcademicDepartmentDto,
    responses(
        (status = 201, description = "Academic department created", body = AcademicDepartment),
        (status = 404, description = "Academic faculty not found"),
        (status = 409, description = "Academic department already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic Departments"
)]
#[instrument(skip(state))]
pub async fn create_academic_department(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAcademicDepartmentDto>,
) -> Result<(StatusCode, Json<AcademicDepartment>), AppError> {
    let department =
        AcademicDepartmentService::create_academic_department(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(department)))
}

#[utoipa::path(
    get,
    path = "/api/academic-departments",
    summary = "List academic departments",
    params(AcademicDepartmentFilterParams),
    responses(
        (status = 200, description = "Paginated academic departments", body = PaginatedAcademicDepartmentsResponse)
    ),
    tag = "Academic Departments"
)]
#[instrument(skip(state))]
pub async fn get_academic_departments(
    State(state): State<AppState>,
    Query(filter): Query<AcademicDepartmentFilterParams>,
) -> Result<Json<PaginatedAcademicDepartmentsResponse>, AppError> {
    let departments =
        AcademicDepartmentService::get_academic_departments(state.store.as_ref(), filter).await?;
    Ok(Json(departments))
}

#[utoipa::path(
    get,
    path = "/api/academic-departments/{id}",
    summary = "Get academic department",
    params(
        ("id" = Uuid, Path, description = "Academic department ID")
    ),
    responses(
        (status = 200, description = "Academic department", body = AcademicDepartment),
        (status = 404, description = "Academic department not found")
    ),
    tag = "Academic Departments"
)]
#[instrument(skip(state))]
pub async fn get_academic_department(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicDepartment>, AppError> {
    let department =
        AcademicDepartmentService::get_academic_department(state.store.as_ref(), id.into())
            .await?;
    Ok(Json(department))
}
