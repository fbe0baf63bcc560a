// --- File: crates/scheduler_rooms/src/memory.rs ---
//! In-memory booking store.
//!
//! Used when no database is configured (optionally seeded from a JSON file)
//! and by the tests. Writes hold the lock across the overlap check and the
//! insert, so two concurrent writers cannot both book the same slot.

use chrono::NaiveDate;
use scheduler_common::{
    conflict, not_found, validation_error, BoxFuture, Context, LectureSchedule, NewSession, Room,
    ScheduleSource, SchedulerError, Session, SessionId, SessionStore,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::logic::intervals_overlap;

/// Serializable snapshot of everything the store holds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleData {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub lecture_schedules: Vec<LectureSchedule>,
}

#[derive(Debug, Default)]
pub struct InMemorySchedule {
    data: RwLock<ScheduleData>,
    /// Highest session id handed out so far. Ids of deleted sessions are
    /// never reused.
    last_session_id: AtomicI64,
}

impl InMemorySchedule {
    pub fn new(data: ScheduleData) -> Self {
        let last_session_id = data.sessions.iter().map(|s| s.id).max().unwrap_or(0);
        Self {
            data: RwLock::new(data),
            last_session_id: AtomicI64::new(last_session_id),
        }
    }

    /// Loads a `ScheduleData` JSON document.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SchedulerError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixtures {}", path.display()))?;
        let data: ScheduleData = serde_json::from_str(&raw)?;
        info!(
            "Loaded {} rooms, {} sessions, {} lecture schedules from {}",
            data.rooms.len(),
            data.sessions.len(),
            data.lecture_schedules.len(),
            path.display()
        );
        Ok(Self::new(data))
    }

    pub async fn snapshot(&self) -> ScheduleData {
        self.data.read().await.clone()
    }
}

/// Checks that the room exists and is not held by another overlapping session.
fn check_room_is_free(
    data: &ScheduleData,
    session: &NewSession,
    ignore: Option<SessionId>,
) -> Result<(), SchedulerError> {
    let Some(room_id) = session.room_id else {
        return Ok(());
    };
    if !data.rooms.iter().any(|room| room.id == room_id) {
        return Err(validation_error(format!("Unknown room {}", room_id)));
    }
    let clash = data.sessions.iter().find(|other| {
        Some(other.id) != ignore
            && other.room_id == Some(room_id)
            && other.date == session.date
            && intervals_overlap(
                session.start_time,
                session.end_time,
                other.start_time,
                other.end_time,
            )
    });
    match clash {
        Some(other) => Err(conflict(format!(
            "Room {} is already booked by session {} on {}",
            room_id, other.id, session.date
        ))),
        None => Ok(()),
    }
}

impl ScheduleSource for InMemorySchedule {
    fn list_rooms(&self) -> BoxFuture<'_, Vec<Room>, SchedulerError> {
        Box::pin(async move { Ok(self.data.read().await.rooms.clone()) })
    }

    fn list_sessions_for_date(
        &self,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async move {
            let data = self.data.read().await;
            Ok(data
                .sessions
                .iter()
                .filter(|session| session.date == date)
                .cloned()
                .collect())
        })
    }

    fn list_lecture_schedules_for_day(
        &self,
        weekday: &str,
    ) -> BoxFuture<'_, Vec<LectureSchedule>, SchedulerError> {
        let weekday = weekday.to_string();
        Box::pin(async move {
            let data = self.data.read().await;
            Ok(data
                .lecture_schedules
                .iter()
                .filter(|lecture| lecture.day_of_week == weekday)
                .cloned()
                .collect())
        })
    }

    fn list_sessions(&self) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async move { Ok(self.data.read().await.sessions.clone()) })
    }
}

impl SessionStore for InMemorySchedule {
    fn get_session(&self, id: SessionId) -> BoxFuture<'_, Option<Session>, SchedulerError> {
        Box::pin(async move {
            let data = self.data.read().await;
            Ok(data.sessions.iter().find(|s| s.id == id).cloned())
        })
    }

    fn create_session(&self, session: NewSession) -> BoxFuture<'_, Session, SchedulerError> {
        Box::pin(async move {
            session.validate()?;
            let mut data = self.data.write().await;
            check_room_is_free(&data, &session, None)?;

            // Bumped under the write lock, so ids follow insertion order.
            let id = self.last_session_id.fetch_add(1, Ordering::SeqCst) + 1;
            let created = Session::from_new(id, session);
            data.sessions.push(created.clone());
            debug!("Created session {}", id);
            Ok(created)
        })
    }

    fn update_session(
        &self,
        id: SessionId,
        session: NewSession,
    ) -> BoxFuture<'_, Session, SchedulerError> {
        Box::pin(async move {
            session.validate()?;
            let mut data = self.data.write().await;
            if !data.sessions.iter().any(|s| s.id == id) {
                return Err(not_found(format!("Session {}", id)));
            }
            check_room_is_free(&data, &session, Some(id))?;

            let updated = Session::from_new(id, session);
            if let Some(slot) = data.sessions.iter_mut().find(|s| s.id == id) {
                *slot = updated.clone();
            }
            debug!("Updated session {}", id);
            Ok(updated)
        })
    }

    fn delete_session(&self, id: SessionId) -> BoxFuture<'_, bool, SchedulerError> {
        Box::pin(async move {
            let mut data = self.data.write().await;
            let before = data.sessions.len();
            data.sessions.retain(|s| s.id != id);
            Ok(data.sessions.len() != before)
        })
    }
}
