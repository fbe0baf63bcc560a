// File: crates/scheduler_rooms/src/handlers.rs
use crate::duplicates::{find_possible_duplicates, DuplicateQuery, DuplicateSessionsResponse};
use crate::logic::{AvailabilityQuery, AvailabilityRequest, AvailableRoomsResponse};
use crate::service::RoomAvailabilityService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Json, Response},
};
use scheduler_common::{
    conflict, handle_json_result, not_found, validation_error, NewSession, Room, ScheduleSource,
    SchedulerError, Session, SessionId, SessionStore,
};
use std::sync::Arc;
use tracing::{info, warn};

// Shared state needed by the room and session handlers
#[derive(Clone)]
pub struct RoomsState {
    pub availability: Arc<RoomAvailabilityService>,
    pub source: Arc<dyn ScheduleSource>,
    pub store: Arc<dyn SessionStore>,
}

/// Handler to list the rooms free for a date and time slot.
#[axum::debug_handler]
pub async fn get_available_rooms_handler(
    State(state): State<Arc<RoomsState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableRoomsResponse>, SchedulerError> {
    let request = query.parse()?;
    request.validate()?;

    let outcome = state.availability.check(&request).await?;
    Ok(Json(AvailableRoomsResponse {
        date: request.date.format("%Y-%m-%d").to_string(),
        weekday: outcome.weekday.to_string(),
        start_time: request.start_time.format("%H:%M").to_string(),
        end_time: request.end_time.format("%H:%M").to_string(),
        degraded: outcome.degraded,
        rooms: outcome.rooms,
    }))
}

/// Handler to list every room.
#[axum::debug_handler]
pub async fn list_rooms_handler(
    State(state): State<Arc<RoomsState>>,
) -> Result<Json<Vec<Room>>, Response> {
    handle_json_result(state.source.list_rooms().await)
}

/// Rejects a write whose room is unknown or not free for the session's slot.
///
/// Runs the full availability check (sessions and lectures) so that a
/// lecture in the room blocks the booking too; the store then re-checks
/// sessions atomically with the write.
async fn ensure_room_available(
    state: &RoomsState,
    session: &NewSession,
    editing: Option<SessionId>,
) -> Result<(), SchedulerError> {
    let Some(room_id) = session.room_id else {
        return Ok(());
    };

    let mut request = AvailabilityRequest::new(session.date, session.start_time, session.end_time);
    if let Some(id) = editing {
        request = request.excluding(id);
    }
    let outcome = state.availability.check(&request).await?;
    if !outcome.known_room_ids.contains(&room_id) {
        return Err(validation_error(format!("Unknown room {}", room_id)));
    }
    if outcome.degraded {
        warn!(
            "Booking room {} without a verified availability check (fail-open)",
            room_id
        );
        return Ok(());
    }
    if outcome.rooms.iter().any(|room| room.id == room_id) {
        Ok(())
    } else {
        Err(conflict(format!(
            "Room {} is not available on {} from {} to {}",
            room_id,
            session.date,
            session.start_time.format("%H:%M"),
            session.end_time.format("%H:%M")
        )))
    }
}

/// Handler to create a session.
#[axum::debug_handler]
pub async fn create_session_handler(
    State(state): State<Arc<RoomsState>>,
    Json(session): Json<NewSession>,
) -> Result<(StatusCode, Json<Session>), SchedulerError> {
    session.validate()?;
    ensure_room_available(&state, &session, None).await?;

    let created = state.store.create_session(session).await?;
    info!("Session {} created", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Handler to edit a session; the session never conflicts with itself.
#[axum::debug_handler]
pub async fn update_session_handler(
    State(state): State<Arc<RoomsState>>,
    Path(session_id): Path<SessionId>,
    Json(session): Json<NewSession>,
) -> Result<Json<Session>, SchedulerError> {
    session.validate()?;
    if state.store.get_session(session_id).await?.is_none() {
        return Err(not_found(format!("Session {}", session_id)));
    }
    ensure_room_available(&state, &session, Some(session_id)).await?;

    let updated = state.store.update_session(session_id, session).await?;
    info!("Session {} updated", updated.id);
    Ok(Json(updated))
}

/// Handler to delete a session.
#[axum::debug_handler]
pub async fn delete_session_handler(
    State(state): State<Arc<RoomsState>>,
    Path(session_id): Path<SessionId>,
) -> Result<StatusCode, SchedulerError> {
    if state.store.delete_session(session_id).await? {
        info!("Session {} deleted", session_id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(format!("Session {}", session_id)))
    }
}

/// Handler listing sessions that may be duplicates of a student name.
#[axum::debug_handler]
pub async fn find_duplicates_handler(
    State(state): State<Arc<RoomsState>>,
    Query(query): Query<DuplicateQuery>,
) -> Result<Json<DuplicateSessionsResponse>, SchedulerError> {
    let sessions = state.source.list_sessions().await?;
    let matches = find_possible_duplicates(&query.student_name, &sessions, query.exclude_session_id)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(DuplicateSessionsResponse {
        advisory: true,
        matches,
    }))
}
