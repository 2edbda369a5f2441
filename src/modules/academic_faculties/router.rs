use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_academic_faculty, get_academic_faculties, get_academic_faculty};

pub fn init_academic_faculties_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_academic_faculty).get(get_academic_faculties))
        .route("/{id}", get(get_academic_faculty))
}
