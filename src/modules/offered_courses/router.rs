use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_offered_course, delete_offered_course, get_offered_course, get_offered_courses,
    update_offered_course,
};

pub fn init_offered_courses_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_offered_course).get(get_offered_courses))
        .route(
            "/{id}",
            get(get_offered_course)
                .patch(update_offered_course)
                .delete(delete_offered_course),
        )
}
