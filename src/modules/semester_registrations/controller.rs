use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::instrument;
use uuid::Uuid;

use campusbyte_core::AppError;

use crate::modules::semester_registrations::model::{
    CreateSemesterRegistrationDto, PaginatedSemesterRegistrationsResponse, SemesterRegistration,
    SemesterRegistrationFilterParams, UpdateSemesterRegistrationDto,
};
use crate::modules::semester_registrations::service::SemesterRegistrationService;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    post,
    path = "/api/semester-registrations",
    summary = "Create semester registration",
    request_body = CreateSemesterRegistrationDto,
    responses(
        (status = 201, description = "Semester registration created", body = SemesterRegistration),
        (status = 404, description = "Academic semester not found"),
        (status = 409, description = "An open registration exists or the semester is already registered"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Semester Registrations"
)]
#[instrument(skip(state))]
pub async fn create_semester_registration(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreateSemesterRegistrationDto>,
) -> Result<(StatusCode, Json<SemesterRegistration>), AppError> {
    let registration =
        SemesterRegistrationService::create_semester_registration(state.store.as_ref(), dto)
            .await?;
    Ok((StatusCode::CREATED, Json(registration)))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations",
    summary = "List semester registrations",
    params(SemesterRegistrationFilterParams),
    responses(
        (status = 200, description = "Paginated semester registrations", body = PaginatedSemesterRegistrationsResponse)
    ),
    tag = "Semester Registrations"
)]
#[instrument(skip(state))]
pub async fn get_semester_registrations(
    State(state): State<AppState>,
    Query(filter): Query<SemesterRegistrationFilterParams>,
) -> Result<Json<PaginatedSemesterRegistrationsResponse>, AppError> {
    let registrations =
        SemesterRegistrationService::get_semester_registrations(state.store.as_ref(), filter)
            .await?;
    Ok(Json(registrations))
}

#[utoipa::path(
    get,
    path = "/api/semester-registrations/{id}",
    summary = "Get semester registration",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    responses(
        (status = 200, description = "Semester registration", body = SemesterRegistration),
        (status = 404, description = "Semester registration not found")
    ),
    tag = "Semester Registrations"
)]
#[instrument(skip(state))]
pub async fn get_semester_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SemesterRegistration>, AppError> {
    let registration =
        SemesterRegistrationService::get_semester_registration(state.store.as_ref(), id.into())
            .await?;
    Ok(Json(registration))
}

#[utoipa::path(
    patch,
    path = "/api/semester-registrations/{id}",
    summary = "Update semester registration",
    description = "Status only moves forward: UPCOMING to ONGOING to ENDED. An ENDED registration can not be updated.",
    params(
        ("id" = Uuid, Path, description = "Semester registration ID")
    ),
    request_body = UpdateSemesterRegistrationDto,
    responses(
        (status = 200, description = "Semester registration updated", body = SemesterRegistration),
        (status = 400, description = "Invalid status transition"),
        (status = 404, description = "Semester registration not found"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Semester Registrations"
)]
#[instrument(skip(state))]
pub async fn update_semester_registration(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSemesterRegistrationDto>,
) -> Result<Json<SemesterRegistration>, AppError> {
    let registration = SemesterRegistrationService::update_semester_registration(
        state.store.as_ref(),
        id.into(),
        dto,
    )
    .await?;
    Ok(Json(registration))
}
