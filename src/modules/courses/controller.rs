use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::{AppError, PaginationParams};

use crate::modules::courses::model::{
    AssignCourseFacultiesDto, Course, CourseFacultiesResponse, CreateCourseDto,
    PaginatedCoursesResponse, UpdateCourseDto,
};
use crate::modules::courses::service::CourseService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/courses",
    summary = "Create course",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created", body = Course),
        (status = 409, description = "A course with this title already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn create_course(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = CourseService::create_course(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    summary = "List courses",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated courses", body = PaginatedCoursesResponse)
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedCoursesResponse>, AppError> {
    let courses = CourseService::get_courses(state.store.as_ref(), params).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    summary = "Get course",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::get_course(state.store.as_ref(), id.into()).await?;
    Ok(Json(course))
}

#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    summary = "Update course",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = Course),
        (status = 404, description = "Course not found"),
        (status = 409, description = "A course with this title already exists"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateCourseDto>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::update_course(state.store.as_ref(), id.into(), dto).await?;
    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    summary = "Delete course",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Deleted course", body = Course),
        (status = 404, description = "Course not found"),
        (status = 409, description = "The course still has offerings")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Course>, AppError> {
    let course = CourseService::delete_course(state.store.as_ref(), id.into()).await?;
    Ok(Json(course))
}

#[utoipa::path(
    put,
    path = "/api/courses/{id}/faculties",
    summary = "Assign faculties to course",
    description = "Adds faculty members to the list of those eligible to teach the course. Already eligible members are ignored.",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = AssignCourseFacultiesDto,
    responses(
        (status = 200, description = "Eligible faculty after the change", body = CourseFacultiesResponse),
        (status = 404, description = "Course or faculty not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn assign_faculties(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCourseFacultiesDto>,
) -> Result<Json<CourseFacultiesResponse>, AppError> {
    let response = CourseService::assign_faculties(state.store.as_ref(), id.into(), dto).await?;
    Ok(Json(response))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}/faculties",
    summary = "Remove faculties from course",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    request_body = AssignCourseFacultiesDto,
    responses(
        (status = 200, description = "Eligible faculty after the change", body = CourseFacultiesResponse),
        (status = 404, description = "Course not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn remove_faculties(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<AssignCourseFacultiesDto>,
) -> Result<Json<CourseFacultiesResponse>, AppError> {
    let response = CourseService::remove_faculties(state.store.as_ref(), id.into(), dto).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}/faculties",
    summary = "Get eligible faculties",
    params(
        ("id" = Uuid, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Faculty members eligible to teach the course", body = CourseFacultiesResponse),
        (status = 404, description = "Course not found")
    ),
    tag = "Courses"
)]
#[instrument(skip(state))]
pub async fn get_faculties(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CourseFacultiesResponse>, AppError> {
    let response = CourseService::get_faculties(state.store.as_ref(), id.into()).await?;
    Ok(Json(response))
}
