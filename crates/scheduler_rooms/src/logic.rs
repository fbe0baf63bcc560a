// --- File: crates/scheduler_rooms/src/logic.rs ---
use chrono::{Datelike, NaiveDate, NaiveTime};
use scheduler_common::models::time_of_day;
use scheduler_common::{validation_error, LectureSchedule, Room, RoomId, SchedulerError, Session, SessionId};
use scheduler_config::WeekdayLocale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

// --- Weekday names ---

/// Weekday-name table indexed by day-of-week number, Sunday = 0.
///
/// Lecture schedules carry their weekday as a name, so the checker turns the
/// requested date into a name from this table and compares strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekdayNames([&'static str; 7]);

impl WeekdayNames {
    pub const ENGLISH: WeekdayNames = WeekdayNames([
        "Sunday",
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
    ]);

    pub const INDONESIAN: WeekdayNames = WeekdayNames([
        "Minggu", "Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu",
    ]);

    pub fn for_locale(locale: WeekdayLocale) -> Self {
        match locale {
            WeekdayLocale::English => Self::ENGLISH,
            WeekdayLocale::Indonesian => Self::INDONESIAN,
        }
    }

    /// Name of the weekday `date` falls on.
    pub fn name_of(&self, date: NaiveDate) -> &'static str {
        self.0[date.weekday().num_days_from_sunday() as usize]
    }
}

impl Default for WeekdayNames {
    fn default() -> Self {
        Self::ENGLISH
    }
}

/// Shorthand for `names.name_of(date)`.
pub fn weekday_name(date: NaiveDate, names: &WeekdayNames) -> &'static str {
    names.name_of(date)
}

// --- Parsing ---

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<NaiveDate, SchedulerError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SchedulerError::ParseError(format!("Invalid date '{}' (expected YYYY-MM-DD)", value))
    })
}

/// Parses a time of day written as `HH:MM` or `HH:MM:SS`.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, SchedulerError> {
    time_of_day::parse(value).map_err(|_| {
        SchedulerError::ParseError(format!("Invalid time '{}' (expected HH:MM or HH:MM:SS)", value))
    })
}

// --- Data Structures ---

/// Query string of the availability endpoint, before parsing.
#[derive(Deserialize, Debug, Clone)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct AvailabilityQuery {
    /// Date in YYYY-MM-DD format
    #[cfg_attr(feature = "openapi", schema(format = "date", example = "2025-01-15"))]
    pub date: String,
    /// Start time, HH:MM or HH:MM:SS
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    /// End time, HH:MM or HH:MM:SS
    #[cfg_attr(feature = "openapi", schema(example = "09:45"))]
    pub end_time: String,
    /// Session being edited; it never conflicts with itself
    #[serde(default)]
    pub exclude_session_id: Option<SessionId>,
}

impl AvailabilityQuery {
    pub fn parse(&self) -> Result<AvailabilityRequest, SchedulerError> {
        Ok(AvailabilityRequest {
            date: parse_date(&self.date)?,
            start_time: parse_time_of_day(&self.start_time)?,
            end_time: parse_time_of_day(&self.end_time)?,
            exclude_session_id: self.exclude_session_id,
        })
    }
}

/// A proposed booking slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityRequest {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude_session_id: Option<SessionId>,
}

impl AvailabilityRequest {
    pub fn new(date: NaiveDate, start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            date,
            start_time,
            end_time,
            exclude_session_id: None,
        }
    }

    pub fn excluding(mut self, session_id: SessionId) -> Self {
        self.exclude_session_id = Some(session_id);
        self
    }

    /// The checker itself does not call this; callers validate before asking.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.start_time >= self.end_time {
            return Err(validation_error("start_time must be before end_time"));
        }
        Ok(())
    }

    fn overlaps(&self, other_start: NaiveTime, other_end: NaiveTime) -> bool {
        intervals_overlap(self.start_time, self.end_time, other_start, other_end)
    }
}

#[derive(Serialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AvailableRoomsResponse {
    #[cfg_attr(feature = "openapi", schema(example = "2025-01-15"))]
    pub date: String,
    #[cfg_attr(feature = "openapi", schema(example = "Wednesday"))]
    pub weekday: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:00"))]
    pub start_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "09:45"))]
    pub end_time: String,
    /// True when bookings could not be read and the fail-open policy returned every room.
    pub degraded: bool,
    pub rooms: Vec<Room>,
}

// --- Availability Logic ---

/// Strict overlap of `[a_start, a_end)` and `[b_start, b_end)`.
///
/// Touching intervals (`a_end == b_start`) do not overlap.
pub fn intervals_overlap(
    a_start: NaiveTime,
    a_end: NaiveTime,
    b_start: NaiveTime,
    b_end: NaiveTime,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Ids of rooms booked during the requested slot.
///
/// Sessions count when they are on the requested date, have a room, are not
/// the excluded session and overlap the slot. Lectures count when they fall on
/// the requested weekday, overlap the slot and their room name matches a known
/// room (case-insensitive); unmatched lecture rooms are ignored.
pub fn conflicting_room_ids(
    rooms: &[Room],
    sessions: &[Session],
    lectures: &[LectureSchedule],
    request: &AvailabilityRequest,
    weekday_names: &WeekdayNames,
) -> BTreeSet<RoomId> {
    let weekday = weekday_names.name_of(request.date);
    let mut conflicts = BTreeSet::new();

    let candidate_sessions = sessions
        .iter()
        .filter(|session| session.date == request.date)
        .filter(|session| Some(session.id) != request.exclude_session_id);
    for session in candidate_sessions {
        let Some(room_id) = session.room_id else {
            continue;
        };
        if request.overlaps(session.start_time, session.end_time) {
            debug!("Session {} occupies room {}", session.id, room_id);
            conflicts.insert(room_id);
        }
    }

    for lecture in lectures.iter().filter(|lecture| lecture.day_of_week == weekday) {
        if !request.overlaps(lecture.start_time, lecture.end_time) {
            continue;
        }
        match rooms.iter().find(|room| room.has_name(&lecture.room)) {
            Some(room) => {
                debug!("Lecture on {} occupies room {}", weekday, room.id);
                conflicts.insert(room.id);
            }
            None => debug!("Lecture room '{}' matches no known room", lecture.room),
        }
    }

    conflicts
}

/// Rooms free for the requested slot, in the order of `rooms`.
pub fn find_available_rooms(
    rooms: &[Room],
    sessions: &[Session],
    lectures: &[LectureSchedule],
    request: &AvailabilityRequest,
    weekday_names: &WeekdayNames,
) -> Vec<Room> {
    let conflicts = conflicting_room_ids(rooms, sessions, lectures, request, weekday_names);
    debug!(
        "Availability for {} {}-{}: {} of {} rooms booked",
        request.date,
        request.start_time,
        request.end_time,
        conflicts.len(),
        rooms.len()
    );
    rooms
        .iter()
        .filter(|room| !conflicts.contains(&room.id))
        .cloned()
        .collect()
}
