// --- File: crates/scheduler_rooms/src/service.rs ---
//! Availability service: fetches bookings through a `ScheduleSource` and runs
//! the conflict check over them.

use scheduler_common::{Room, RoomId, ScheduleSource, SchedulerError};
use scheduler_config::{AvailabilityConfig, FetchFailurePolicy};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::logic::{find_available_rooms, AvailabilityRequest, WeekdayNames};
use crate::sequencer::RequestSequencer;

/// Result of one availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityOutcome {
    /// Weekday name the lecture schedules were matched against.
    pub weekday: &'static str,
    pub rooms: Vec<Room>,
    /// Ids of every room the source knows, free or not.
    pub known_room_ids: Vec<RoomId>,
    /// Bookings could not be read and every room was returned (fail-open only).
    pub degraded: bool,
}

pub struct RoomAvailabilityService {
    source: Arc<dyn ScheduleSource>,
    policy: FetchFailurePolicy,
    weekday_names: WeekdayNames,
}

impl RoomAvailabilityService {
    pub fn new(
        source: Arc<dyn ScheduleSource>,
        policy: FetchFailurePolicy,
        weekday_names: WeekdayNames,
    ) -> Self {
        Self {
            source,
            policy,
            weekday_names,
        }
    }

    pub fn from_config(source: Arc<dyn ScheduleSource>, config: &AvailabilityConfig) -> Self {
        info!(
            "Room availability uses policy {:?} with {:?} weekday names",
            config.fetch_failure_policy, config.weekday_names
        );
        Self::new(
            source,
            config.fetch_failure_policy,
            WeekdayNames::for_locale(config.weekday_names),
        )
    }

    pub fn policy(&self) -> FetchFailurePolicy {
        self.policy
    }

    pub fn weekday_names(&self) -> &WeekdayNames {
        &self.weekday_names
    }

    /// Rooms without a conflicting session or lecture in the requested slot.
    ///
    /// # Errors
    ///
    /// * the room list cannot be fetched (under either policy)
    /// * `AvailabilityUnknown` when sessions or lectures cannot be fetched and
    ///   the policy is fail-closed
    pub async fn check(
        &self,
        request: &AvailabilityRequest,
    ) -> Result<AvailabilityOutcome, SchedulerError> {
        let rooms = self.source.list_rooms().await.map_err(|e| {
            error!("Failed to fetch rooms: {}", e);
            e
        })?;
        let weekday = self.weekday_names.name_of(request.date);
        let known_room_ids: Vec<RoomId> = rooms.iter().map(|room| room.id).collect();

        let bookings = async {
            let sessions = self.source.list_sessions_for_date(request.date).await?;
            let lectures = self.source.list_lecture_schedules_for_day(weekday).await?;
            Ok::<_, SchedulerError>((sessions, lectures))
        }
        .await;

        match bookings {
            Ok((sessions, lectures)) => {
                debug!(
                    "Checking {} rooms against {} sessions and {} lectures",
                    rooms.len(),
                    sessions.len(),
                    lectures.len()
                );
                let available =
                    find_available_rooms(&rooms, &sessions, &lectures, request, &self.weekday_names);
                Ok(AvailabilityOutcome {
                    weekday,
                    rooms: available,
                    known_room_ids,
                    degraded: false,
                })
            }
            Err(err) => match self.policy {
                FetchFailurePolicy::FailClosed => {
                    error!("Booking fetch failed, availability unknown: {}", err);
                    Err(SchedulerError::AvailabilityUnknown(err.to_string()))
                }
                FetchFailurePolicy::FailOpen => {
                    warn!(
                        "Booking fetch failed, returning all {} rooms unchecked: {}",
                        rooms.len(),
                        err
                    );
                    Ok(AvailabilityOutcome {
                        weekday,
                        rooms,
                        known_room_ids,
                        degraded: true,
                    })
                }
            },
        }
    }

    /// Like `check`, but returns `Ok(None)` when a newer request was issued on
    /// `sequencer` before this one finished. Errors of stale requests are
    /// dropped as well.
    pub async fn check_latest(
        &self,
        sequencer: &RequestSequencer,
        request: &AvailabilityRequest,
    ) -> Result<Option<AvailabilityOutcome>, SchedulerError> {
        let ticket = sequencer.issue();
        let outcome = self.check(request).await;
        if !sequencer.is_latest(ticket) {
            debug!("Discarding stale availability result #{}", ticket.sequence());
            return Ok(None);
        }
        outcome.map(Some)
    }
}
