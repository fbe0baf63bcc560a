mod fixtures;

use axum::http::StatusCode;
use fixtures::*;
use scheduler_config::AvailabilityConfig;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_scenario_over_http() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-15&start_time=09:00&end_time=09:45",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(room_ids(&body).is_empty());

    let (status, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-15&start_time=10:00&end_time=11:00",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(room_ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_other_weekday_ignores_wednesday_lecture() {
    let app = create_test_app();

    let (_, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-16&start_time=08:30&end_time=09:00",
        None,
    )
    .await;

    assert_eq!(body["weekday"], "Thursday");
    assert_eq!(room_ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_editing_session_excludes_itself() {
    let app = create_test_app();

    let (_, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-15&start_time=09:30&end_time=10:30&exclude_session_id=1",
        None,
    )
    .await;

    assert_eq!(room_ids(&body), vec![1]);
}

#[tokio::test]
async fn test_invalid_slots_are_bad_requests() {
    let app = create_test_app();

    for uri in [
        "/rooms/available?date=2025-01-15&start_time=10:00&end_time=10:00",
        "/rooms/available?date=2025-01-15&start_time=11:00&end_time=10:00",
        "/rooms/available?date=tomorrow&start_time=09:00&end_time=10:00",
        "/rooms/available?date=2025-01-15&start_time=25:00&end_time=26:00",
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"]["code"], 400);
    }
}

#[tokio::test]
async fn test_fetch_failure_is_service_unavailable_when_fail_closed() {
    let app = create_unavailable_app(AvailabilityConfig::default());

    let (status, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-15&start_time=09:00&end_time=10:00",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], 503);
}

#[tokio::test]
async fn test_fetch_failure_returns_all_rooms_when_fail_open() {
    let app = create_unavailable_app(fail_open_config());

    let (status, body) = send(
        &app,
        "GET",
        "/rooms/available?date=2025-01-15&start_time=09:00&end_time=10:00",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["degraded"], true);
    assert_eq!(room_ids(&body), vec![1, 2]);
}

#[tokio::test]
async fn test_fail_closed_blocks_booking_when_availability_unknown() {
    let app = create_unavailable_app(AvailabilityConfig::default());

    let (status, body) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 2
        })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], 503);
}

#[tokio::test]
async fn test_fail_open_booking_proceeds_when_availability_unknown() {
    let app = create_unavailable_app(fail_open_config());

    let (status, created) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["room_id"], 2);

    // The store still refuses a double booking
    let (status, _) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:30",
            "end_time": "14:30",
            "room_id": 2
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_booking_flow() {
    let app = create_test_app();

    // R2 has a lecture until 09:30
    let (status, _) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": 2,
            "student_name": "Siti Rahmawati"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, created) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "09:30",
            "end_time": "10:30",
            "room_id": 2,
            "student_name": "Siti Rahmawati"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["start_time"], "09:30:00");
    let id = created["id"].as_i64().unwrap();

    // Moving it within its own slot is fine
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/sessions/{}", id),
        Some(json!({
            "date": "2025-01-15",
            "start_time": "10:00",
            "end_time": "11:00",
            "room_id": 2,
            "student_name": "Siti Rahmawati"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["end_time"], "11:00:00");

    // Into R1's 09:00-10:00 defense is not
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/sessions/{}", id),
        Some(json!({
            "date": "2025-01-15",
            "start_time": "09:15",
            "end_time": "10:15",
            "room_id": 1,
            "student_name": "Siti Rahmawati"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_room_and_unknown_session_on_write() {
    let app = create_test_app();
    let payload = json!({
        "date": "2025-01-15",
        "start_time": "13:00",
        "end_time": "14:00",
        "room_id": 9
    });

    let (status, _) = send(&app, "POST", "/sessions", Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "PUT",
        "/sessions/77",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_of_unknown_session_is_not_found_even_into_busy_slot() {
    let app = create_test_app();

    // R1 is held 09:00-10:00 by session 1
    let (status, body) = send(
        &app,
        "PUT",
        "/sessions/77",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], 404);

    let (status, _) = send(
        &app,
        "PUT",
        "/sessions/77",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 9
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_names_are_advisory() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/sessions/duplicates?student_name=budi", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["advisory"], true);
    assert_eq!(body["matches"][0]["id"], 1);

    let (_, body) = send(
        &app,
        "GET",
        "/sessions/duplicates?student_name=budi&exclude_session_id=1",
        None,
    )
    .await;
    assert_eq!(body["matches"].as_array().map(Vec::len), Some(0));

    // A similar name never blocks a booking
    let (status, _) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-20",
            "start_time": "09:00",
            "end_time": "10:00",
            "room_id": 1,
            "student_name": "Budi Santoso"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_booking_fetches_rooms_once() {
    let source = Arc::new(CountingSource::new());
    let app = create_counting_app(source.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(source.room_fetches(), 1);

    let (status, _) = send(
        &app,
        "POST",
        "/sessions",
        Some(json!({
            "date": "2025-01-15",
            "start_time": "13:00",
            "end_time": "14:00",
            "room_id": 9
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(source.room_fetches(), 2);
}
