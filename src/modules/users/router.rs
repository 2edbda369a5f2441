use crate::modules::users::controller::{create_admin, create_faculty, create_student};
use crate::state::AppState;
use axum::{Router, routing::post};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/create-student", post(create_student))
        .route("/create-faculty", post(create_faculty))
        .route("/create-admin", post(create_admin))
}
