use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::{AppError, PaginationParams};

use crate::modules::academic_faculties::model::{
    AcademicFaculty, CreateAcademicFacultyDto, PaginatedAcademicFacultiesResponse,
};
use crate::modules::academic_faculties::service::AcademicFacultyService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/academic-faculties",
    summary = "Create academic faculty",
    request_body = CreateAcademicFacultyDto,
    responses(
        (status = 201, description = "Academic faculty created", body = AcademicFaculty),
        (status = 409, description = "Academic faculty already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Academic Faculties"
)]
#[instrument(skip(state))]
pub async fn create_academic_faculty(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateAcademicFacultyDto>,
) -> Result<(StatusCode, Json<AcademicFaculty>), AppError> {
    let faculty = AcademicFacultyService::create_academic_faculty(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(faculty)))
}

#[utoipa::path(
    get,
    path = "/api/academic-faculties",
    summary = "List academic faculties",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated academic faculties", body = PaginatedAcademicFacultiesResponse)
    ),
    tag = "Academic Faculties"
)]
#[instrument(skip(state))]
pub async fn get_academic_faculties(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedAcademicFacultiesResponse>, AppError> {
    let faculties =
        AcademicFacultyService::get_academic_faculties(state.store.as_ref(), params).await?;
    Ok(Json(faculties))
}

#[utoipa::path(
    get,
    path = "/api/academic-faculties/{id}",
    summary = "Get academic faculty",
    params(
        ("id" = Uuid, Path, description = "Academic faculty ID")
    ),
    responses(
        (status = 200, description = "Academic faculty", body = AcademicFaculty),
        (status = 404, description = "Academic faculty not found")
    ),
    tag = "Academic Faculties"
)]
#[instrument(skip(state))]
pub async fn get_academic_faculty(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AcademicFaculty>, AppError> {
    let faculty =
        AcademicFacultyService::get_academic_faculty(state.store.as_ref(), id.into()).await?;
    Ok(Json(faculty))
}
