mod common;

use axum::http::StatusCode;
use campusbyte_models::value_types::RegistrationStatus;
use common::{Campus, send, student_profile, test_app};
use serde_json::json;

fn offering_body(campus: &Campus, section: &str, day: &str, start: &str, end: &str) -> serde_json::Value {
    json!({
        "semester_registration_id": campus.registration.id,
        "academic_faculty_id": campus.academic_faculty.id,
        "academic_department_id": campus.department.id,
        "course_id": campus.course.id,
        "faculty_id": campus.faculty.id,
        "section": section,
        "max_capacity": 40,
        "days": [day],
        "start_time": start,
        "end_time": end,
    })
}

#[tokio::test]
async fn test_health_reports_ok() {
    let campus = Campus::seed().await;
    let (status, body) = send(test_app(&campus.store), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let campus = Campus::seed().await;
    let (status, body) = send(test_app(&campus.store), "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/offered-courses"].is_object());
}

#[tokio::test]
async fn test_create_offering_then_conflict_over_http() {
    let campus = Campus::seed().await;
    let app = test_app(&campus.store);

    let (status, created) = send(
        app.clone(),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "09:00", "10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["section"], "A");
    assert_eq!(created["start_time"], "09:00");

    let (status, body) = send(
        app,
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "B", "Mon", "09:30", "10:30")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "schedule_conflict");
    assert_eq!(body["error"], "Faculty is not available at that time");
}

#[tokio::test]
async fn test_inverted_window_is_unprocessable() {
    let campus = Campus::seed().await;

    let (status, body) = send(
        test_app(&campus.store),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "11:00", "10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["kind"], "unprocessable");
    assert!(campus.store.offered_courses().is_empty());
}

#[tokio::test]
async fn test_malformed_time_is_rejected() {
    let campus = Campus::seed().await;

    let (status, _) = send(
        test_app(&campus.store),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "9am", "10:00")),
    )
    .await;
    assert!(status.is_client_error());
    assert!(campus.store.offered_courses().is_empty());
}

#[tokio::test]
async fn test_patch_and_delete_offering() {
    let campus = Campus::seed().await;
    let app = test_app(&campus.store);

    let (_, created) = send(
        app.clone(),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "09:00", "10:00")),
    )
    .await;
    let uri = format!("/api/offered-courses/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(
        app.clone(),
        "PATCH",
        &uri,
        Some(json!({ "max_capacity": 55 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["max_capacity"], 55);

    let (status, deleted) = send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], created["id"]);

    let (status, body) = send(app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
}

#[tokio::test]
async fn test_patch_and_delete_course() {
    let campus = Campus::seed().await;
    let app = test_app(&campus.store);
    let uri = format!("/api/courses/{}", campus.course.id);

    let (status, updated) = send(app.clone(), "PATCH", &uri, Some(json!({ "credits": 4 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["credits"], 4);
    assert_eq!(updated["title"], "Data Structures");

    let (status, _) = send(
        app.clone(),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "09:00", "10:00")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "conflict");

    let offering_id = campus.store.offered_courses()[0].id;
    send(
        app.clone(),
        "DELETE",
        &format!("/api/offered-courses/{}", offering_id),
        None,
    )
    .await;

    let (status, deleted) = send(app.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], json!(campus.course.id));
    assert!(campus.store.courses().is_empty());

    let (status, _) = send(app, "PATCH", &uri, Some(json!({ "credits": 2 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_offering_changes_blocked_once_registration_opens() {
    let campus = Campus::seed().await;
    let app = test_app(&campus.store);

    let (_, created) = send(
        app.clone(),
        "POST",
        "/api/offered-courses",
        Some(offering_body(&campus, "A", "Mon", "09:00", "10:00")),
    )
    .await;
    campus
        .set_status(campus.registration.id, RegistrationStatus::Ongoing)
        .await;

    let uri = format!("/api/offered-courses/{}", created["id"].as_str().unwrap());
    let (status, body) = send(app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "invalid_state");
}

#[tokio::test]
async fn test_create_student_over_http() {
    let campus = Campus::seed().await;
    let profile = student_profile(&campus, "alan@uni.edu");

    let (status, body) = send(
        test_app(&campus.store),
        "POST",
        "/api/users/create-student",
        Some(json!({
            "student": {
                "first_name": profile.first_name,
                "last_name": profile.last_name,
                "gender": "male",
                "email": profile.email,
                "contact_no": profile.contact_no,
                "emergency_contact_no": profile.emergency_contact_no,
                "present_address": profile.present_address,
                "permanent_address": profile.permanent_address,
                "guardian": profile.guardian,
                "local_guardian": profile.local_guardian,
                "blood_group": "A-",
                "profile_img": "https://cdn.uni.edu/avatars/alan.png",
                "admission_semester_id": profile.admission_semester_id,
                "academic_department_id": profile.academic_department_id,
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["login_id"], "2030010001");
    assert_eq!(body["user"]["needs_password_change"], true);
    assert!(body["user"].get("password_hash").is_none());
    assert_eq!(body["student"]["blood_group"], "A-");
    assert_eq!(body["student"]["guardian"]["mother_name"], "Ethel Turing");
    assert_eq!(body["student"]["local_guardian"]["address"], "3 Harbour Road");
    assert_eq!(
        body["student"]["profile_img"],
        "https://cdn.uni.edu/avatars/alan.png"
    );
}

#[tokio::test]
async fn test_invalid_email_is_unprocessable() {
    let campus = Campus::seed().await;

    let (status, body) = send(
        test_app(&campus.store),
        "POST",
        "/api/users/create-faculty",
        Some(json!({
            "faculty": {
                "designation": "Lecturer",
                "first_name": "Grace",
                "last_name": "Hopper",
                "gender": "female",
                "email": "not-an-email",
                "contact_no": "01711111111",
                "emergency_contact_no": "01722222222",
                "present_address": "1 Faculty Lane",
                "permanent_address": "1 Faculty Lane",
                "academic_department_id": campus.department.id,
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("email"));
}
