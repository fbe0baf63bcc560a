// --- File: crates/scheduler_rooms/src/routes.rs ---

use crate::handlers::{
    create_session_handler, delete_session_handler, find_duplicates_handler,
    get_available_rooms_handler, list_rooms_handler, update_session_handler, RoomsState,
};
use crate::service::RoomAvailabilityService;
use axum::{
    routing::{get, post, put},
    Router,
};
use scheduler_common::{ScheduleSource, SessionStore};
use scheduler_config::AvailabilityConfig;
use std::sync::Arc;

/// Creates a router containing the room and session routes.
pub fn routes(state: Arc<RoomsState>) -> Router {
    Router::new()
        .route("/rooms", get(list_rooms_handler))
        .route("/rooms/available", get(get_available_rooms_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/duplicates", get(find_duplicates_handler))
        .route(
            "/sessions/{session_id}",
            put(update_session_handler).delete(delete_session_handler),
        )
        .with_state(state)
}

/// Builds the state from one store that serves both reads and writes.
pub fn state_for<S>(store: Arc<S>, config: &AvailabilityConfig) -> Arc<RoomsState>
where
    S: ScheduleSource + SessionStore + 'static,
{
    let source: Arc<dyn ScheduleSource> = store.clone();
    Arc::new(RoomsState {
        availability: Arc::new(RoomAvailabilityService::from_config(source.clone(), config)),
        source,
        store,
    })
}
