use crate::docs::ApiDoc;
use crate::modules::academic_departments::router::init_academic_departments_router;
use crate::modules::academic_faculties::router::init_academic_faculties_router;
use crate::modules::academic_semesters::router::init_academic_semesters_router;
use crate::modules::courses::router::init_courses_router;
use crate::modules::offered_courses::router::init_offered_courses_router;
use crate::modules::semester_registrations::router::init_semester_registrations_router;
use crate::modules::users::router::init_users_router;
use crate::state::AppState;
use axum::extract::State;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router, middleware};
use campusbyte_core::AppError;
use campusbyte_observability::{logging_middleware, metrics_middleware};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_scalar::{Scalar, Servable as _};

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness check that also pings the store
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and store are reachable", body = HealthResponse),
        (status = 500, description = "Store is unreachable")
    ),
    tag = "Health"
)]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    state.store.health_check().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}

pub fn init_router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/users", init_users_router())
        .nest("/academic-semesters", init_academic_semesters_router())
        .nest("/academic-faculties", init_academic_faculties_router())
        .nest("/academic-departments", init_academic_departments_router())
        .nest("/courses", init_courses_router())
        .nest(
            "/semester-registrations",
            init_semester_registrations_router(),
        )
        .nest("/offered-courses", init_offered_courses_router());

    Router::new()
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/health", get(health))
        .nest("/api", api)
        .with_state(state.clone())
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
        })
        .layer(middleware::from_fn(metrics_middleware))
        .layer(middleware::from_fn(logging_middleware))
}
