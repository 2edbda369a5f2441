use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_academic_department, get_academic_department, get_academic_departments,
};

pub fn init_academic_departments_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_academic_department).get(get_academic_departments),
        )
        .route("/{id}", get(get_academic_department))
}
