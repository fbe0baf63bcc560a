// --- File: crates/scheduler_common/src/models.rs ---

// Entities read by the availability check. They are owned by the external
// store; the scheduler only reads them, except for sessions, which the
// `SessionStore` trait can also write.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{validation_error, SchedulerError};

pub type RoomId = i64;
pub type SessionId = i64;

/// A physical room that hosts at most one session or lecture at a time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub code: String,
}

impl Room {
    /// Case-insensitive comparison against a free-text room name.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// One scheduled thesis defense.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-01-15"))]
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: NaiveTime,
    /// Sessions without a room never conflict with anything.
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub student_name: Option<String>,
}

impl Session {
    pub fn from_new(id: SessionId, new: NewSession) -> Self {
        Self {
            id,
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            room_id: new.room_id,
            student_name: new.student_name,
        }
    }
}

/// Payload for creating or moving a session.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    #[cfg_attr(feature = "openapi", schema(value_type = String, format = Date, example = "2025-01-15"))]
    pub date: NaiveDate,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "10:00"))]
    pub end_time: NaiveTime,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub student_name: Option<String>,
}

impl NewSession {
    /// Rejects empty or inverted intervals.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        if self.start_time >= self.end_time {
            return Err(validation_error(format!(
                "start_time {} must be before end_time {}",
                self.start_time.format("%H:%M"),
                self.end_time.format("%H:%M")
            )));
        }
        Ok(())
    }
}

/// A recurring weekly class in a room identified only by its name.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LectureSchedule {
    /// Free-text room name, matched case-insensitively against `Room::name`.
    pub room: String,
    /// Weekday name in the configured locale, e.g. "Wednesday" or "Rabu".
    pub day_of_week: String,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "08:00"))]
    pub start_time: NaiveTime,
    #[serde(with = "time_of_day")]
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "09:30"))]
    pub end_time: NaiveTime,
}

/// Serde adapter for time-of-day values written as `HH:MM` or `HH:MM:SS`.
pub mod time_of_day {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    /// Canonical output format; zero-padded so string order is chronological.
    pub const FORMAT: &str = "%H:%M:%S";

    pub fn parse(value: &str) -> Result<NaiveTime, chrono::ParseError> {
        let value = value.trim();
        NaiveTime::parse_from_str(value, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
    }

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }
}
