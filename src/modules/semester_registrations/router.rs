use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    create_semester_registration, get_semester_registration, get_semester_registrations,
    update_semester_registration,
};

pub fn init_semester_registrations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(create_semester_registration).get(get_semester_registrations),
        )
        .route(
            "/{id}",
            get(get_semester_registration).patch(update_semester_registration),
        )
}
