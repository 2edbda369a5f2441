use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    assign_faculties, create_course, delete_course, get_course, get_courses, get_faculties,
    remove_faculties, update_course,
};

pub fn init_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_course).get(get_courses))
        .route(
            "/{id}",
            get(get_course).patch(update_course).delete(delete_course),
        )
        .route(
            "/{id}/faculties",
            get(get_faculties)
                .put(assign_faculties)
                .delete(remove_faculties),
        )
}
