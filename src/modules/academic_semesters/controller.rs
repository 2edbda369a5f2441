use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::{AppError, PaginationParams};
use campusbyte_models::ids::AcademicSemesterId;

use crate::modules::academic_semesters::model::{
    AcademicSemester, CreateAcademicSemesterDto, PaginatedAcademicSemestersResponse,
};
use crate::modules::academic_semesters::service::AcademicSemesterService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/academic-semesters",
    summary = "Create academic semester",
    request_body = CreateAcademicSemesterDto,
    responses(
        (status = 201, description = "Academic semester created", body = AcademicSemester),
        (status = 400, description = "Semester code does not match the name"),
        (status = 409, description = "Semester already exists for this year"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic Semesters"
)]
#[instrument(skip(state))]
pub async fn create_academic_semester(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAcademicSemesterDto>,
) -> Result<(StatusCode, Json<AcademicSemester>), AppError> {
    let semester =
        AcademicSemesterService::create_academic_semester(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(semester)))
}

#[utoipa::path(
    get,
    path = "/api/academic-semesters",
    summary = "List academic semesters",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated academic semesters", body = PaginatedAcademicSemestersResponse)
    ),
    tag = "Academic Semesters"
)]
#[instrument(skip(state))]
pub async fn get_academic_semesters(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedAcademicSemestersResponse>, AppError> {
    let semesters =
        AcademicSemesterService::get_academic_semesters(state.store.as_ref(), params).await?;
    Ok(Json(semesters))
}

#[utoipa::path(
    get,
    path = "/api/academic-semesters/{id}",
    summary = "Get academic semester",
    params(
        ("id" = Uuid, Path, description = "Academic semester ID")
    ),
    responses(
        (status = 200, description = "Academic semester", body = AcademicSemester),
        (status = 404, description = "Academic semester not found")
    ),
    tag = "Academic Semesters"
)]
#[instrument(skip(state))]
pub async fn get_academic_semester(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicSemester>, AppError> {
    let semester = AcademicSemesterService::get_academic_semester(
        state.store.as_ref(),
        AcademicSemesterId::from(id),
    )
    .await?;
    Ok(Json(semester))
}
