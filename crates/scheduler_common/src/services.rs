// --- File: crates/scheduler_common/src/services.rs ---
//! Data-access abstractions for the booking store.
//!
//! The availability check never talks to a database directly; it reads through
//! `ScheduleSource`. Writes go through `SessionStore`, whose implementations
//! must re-check room exclusivity inside their own write critical section,
//! since the availability check alone cannot prevent a concurrent double
//! booking.

use chrono::NaiveDate;
use std::future::Future;
use std::pin::Pin;

use crate::error::SchedulerError;
use crate::models::{LectureSchedule, NewSession, Room, Session, SessionId};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Read side of the booking store.
pub trait ScheduleSource: Send + Sync {
    /// All rooms, in display order.
    fn list_rooms(&self) -> BoxFuture<'_, Vec<Room>, SchedulerError>;

    /// Sessions held on `date`. Implementations may return extra sessions;
    /// callers filter by date again.
    fn list_sessions_for_date(&self, date: NaiveDate)
        -> BoxFuture<'_, Vec<Session>, SchedulerError>;

    /// Lecture schedules whose `day_of_week` equals `weekday`.
    fn list_lecture_schedules_for_day(
        &self,
        weekday: &str,
    ) -> BoxFuture<'_, Vec<LectureSchedule>, SchedulerError>;

    /// Every session, used by the duplicate-name advisory.
    fn list_sessions(&self) -> BoxFuture<'_, Vec<Session>, SchedulerError>;
}

/// Write side of the booking store.
pub trait SessionStore: Send + Sync {
    /// The session with this id, if any.
    fn get_session(&self, id: SessionId) -> BoxFuture<'_, Option<Session>, SchedulerError>;

    /// Inserts a session. Fails with `ConflictError` when its room already
    /// holds an overlapping session on the same date.
    fn create_session(&self, session: NewSession) -> BoxFuture<'_, Session, SchedulerError>;

    /// Replaces a session. The session itself is ignored in the overlap check.
    /// Fails with `NotFoundError` for unknown ids.
    fn update_session(
        &self,
        id: SessionId,
        session: NewSession,
    ) -> BoxFuture<'_, Session, SchedulerError>;

    /// Returns `false` when no session had this id.
    fn delete_session(&self, id: SessionId) -> BoxFuture<'_, bool, SchedulerError>;
}
