use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::AppError;

use crate::modules::offered_courses::model::{
    CreateOfferedCourseDto, OfferedCourse, OfferedCourseFilterParams,
    PaginatedOfferedCoursesResponse, UpdateOfferedCourseDto,
};
use crate::modules::offered_courses::service::OfferedCourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/offered-courses",
    summary = "Offer a course",
    description = "Creates an offering for a semester registration that has not ENDED. The faculty member must be eligible for the course and free at the requested time.",
    request_body = CreateOfferedCourseDto,
    responses(
        (status = 201, description = "Offered course created", body = OfferedCourse),
        (status = 400, description = "Registration ENDED, department outside the faculty, or faculty not eligible"),
        (status = 404, description = "A referenced record was not found"),
        (status = 409, description = "Section already offered or faculty not available at that time"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Offered Courses"
)]
#[instrument(skip(state))]
pub async fn create_offered_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateOfferedCourseDto>,
) -> Result<(StatusCode, Json<OfferedCourse>), AppError> {
    let offered_course =
        OfferedCourseService::create_offered_course(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(offered_course)))
}

#[utoipa::path(
    get,
    path = "/api/offered-courses",
    summary = "List offered courses",
    params(OfferedCourseFilterParams),
    responses(
        (status = 200, description = "Paginated offered courses", body = PaginatedOfferedCoursesResponse)
    ),
    tag = "Offered Courses"
)]
#[instrument(skip(state))]
pub async fn get_offered_courses(
    State(state): State<AppState>,
    Query(filter): Query<OfferedCourseFilterParams>,
) -> Result<Json<PaginatedOfferedCoursesResponse>, AppError> {
    let offered_courses =
        OfferedCourseService::get_offered_courses(state.store.as_ref(), filter).await?;
    Ok(Json(offered_courses))
}

#[utoipa::path(
    get,
    path = "/api/offered-courses/{id}",
    summary = "Get offered course",
    params(
        ("id" = Uuid, Path, description = "Offered course ID")
    ),
    responses(
        (status = 200, description = "Offered course", body = OfferedCourse),
        (status = 404, description = "Offered course not found")
    ),
    tag = "Offered Courses"
)]
#[instrument(skip(state))]
pub async fn get_offered_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferedCourse>, AppError> {
    let offered_course =
        OfferedCourseService::get_offered_course(state.store.as_ref(), id.into()).await?;
    Ok(Json(offered_course))
}

#[utoipa::path(
    patch,
    path = "/api/offered-courses/{id}",
    summary = "Update offered course",
    description = "Only allowed while the semester registration is UPCOMING.",
    params(
        ("id" = Uuid, Path, description = "Offered course ID")
    ),
    request_body = UpdateOfferedCourseDto,
    responses(
        (status = 200, description = "Offered course updated", body = OfferedCourse),
        (status = 400, description = "Registration not UPCOMING or faculty not eligible"),
        (status = 404, description = "Offered course or faculty not found"),
        (status = 409, description = "Faculty not available at that time"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Offered Courses"
)]
#[instrument(skip(state))]
pub async fn update_offered_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateOfferedCourseDto>,
) -> Result<Json<OfferedCourse>, AppError> {
    let offered_course =
        OfferedCourseService::update_offered_course(state.store.as_ref(), id.into(), dto).await?;
    Ok(Json(offered_course))
}

#[utoipa::path(
    delete,
    path = "/api/offered-courses/{id}",
    summary = "Delete offered course",
    description = "Only allowed while the semester registration is UPCOMING. Returns the removed offering.",
    params(
        ("id" = Uuid, Path, description = "Offered course ID")
    ),
    responses(
        (status = 200, description = "Offered course deleted", body = OfferedCourse),
        (status = 400, description = "Registration not UPCOMING"),
        (status = 404, description = "Offered course not found")
    ),
    tag = "Offered Courses"
)]
#[instrument(skip(state))]
pub async fn delete_offered_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OfferedCourse>, AppError> {
    let offered_course =
        OfferedCourseService::delete_offered_course(state.store.as_ref(), id.into()).await?;
    Ok(Json(offered_course))
}
