use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_academic_semester, get_academic_semester, get_academic_semesters};

pub fn init_academic_semesters_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_academic_semester).get(get_academic_semesters))
        .route("/{id}", get(get_academic_semester))
}
