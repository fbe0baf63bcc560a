// File: crates/scheduler_rooms/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::duplicates::{DuplicateQuery, DuplicateSessionsResponse};
use crate::logic::{AvailabilityQuery, AvailableRoomsResponse};
use scheduler_common::{NewSession, Room, Session};

#[utoipa::path(
    get,
    path = "/rooms/available",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Rooms without a conflicting session or lecture", body = AvailableRoomsResponse),
        (status = 400, description = "Malformed date or time, or start_time >= end_time"),
        (status = 503, description = "Bookings could not be read; availability unknown")
    ),
    tag = "rooms"
)]
fn doc_get_available_rooms_handler() {}

#[utoipa::path(
    get,
    path = "/rooms",
    responses(
        (status = 200, description = "All rooms", body = Vec<Room>)
    ),
    tag = "rooms"
)]
fn doc_list_rooms_handler() {}

#[utoipa::path(
    post,
    path = "/sessions",
    request_body(content = NewSession, example = json!({
        "date": "2025-01-15",
        "start_time": "09:00",
        "end_time": "10:00",
        "room_id": 1,
        "student_name": "Siti Rahmawati"
    })),
    responses(
        (status = 201, description = "Session created", body = Session),
        (status = 400, description = "Invalid times or unknown room"),
        (status = 409, description = "Room already booked for an overlapping slot"),
        (status = 503, description = "Availability could not be verified")
    ),
    tag = "sessions"
)]
fn doc_create_session_handler() {}

#[utoipa::path(
    put,
    path = "/sessions/{session_id}",
    params(("session_id" = i64, Path, description = "Session to edit")),
    request_body = NewSession,
    responses(
        (status = 200, description = "Session updated", body = Session),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Room already booked for an overlapping slot")
    ),
    tag = "sessions"
)]
fn doc_update_session_handler() {}

#[utoipa::path(
    delete,
    path = "/sessions/{session_id}",
    params(("session_id" = i64, Path, description = "Session to delete")),
    responses(
        (status = 204, description = "Session deleted"),
        (status = 404, description = "Unknown session")
    ),
    tag = "sessions"
)]
fn doc_delete_session_handler() {}

#[utoipa::path(
    get,
    path = "/sessions/duplicates",
    params(DuplicateQuery),
    responses(
        (status = 200, description = "Sessions with similar student names (advisory)", body = DuplicateSessionsResponse)
    ),
    tag = "sessions"
)]
fn doc_find_duplicates_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_get_available_rooms_handler,
        doc_list_rooms_handler,
        doc_create_session_handler,
        doc_update_session_handler,
        doc_delete_session_handler,
        doc_find_duplicates_handler
    ),
    components(
        schemas(
            AvailabilityQuery,
            AvailableRoomsResponse,
            DuplicateSessionsResponse,
            NewSession,
            Room,
            Session
        )
    ),
    tags(
        (name = "rooms", description = "Room availability"),
        (name = "sessions", description = "Defense session scheduling")
    ),
    servers(
        (url = "/api", description = "Scheduler API server")
    )
)]
pub struct RoomsApiDoc;
