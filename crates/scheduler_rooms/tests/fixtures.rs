//! Test fixtures for the room scheduling API tests
//!
//! Builds the two-room schedule used across the HTTP tests and small helpers
//! to drive the router.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveTime};
use scheduler_common::{
    BoxFuture, LectureSchedule, Room, ScheduleSource, SchedulerError, Session, SessionStore,
};
use scheduler_config::{AvailabilityConfig, FetchFailurePolicy, WeekdayLocale};
use scheduler_rooms::handlers::RoomsState;
use scheduler_rooms::memory::{InMemorySchedule, ScheduleData};
use scheduler_rooms::routes::{routes, state_for};
use scheduler_rooms::service::RoomAvailabilityService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// 2025-01-15, a Wednesday.
pub fn defense_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn create_test_rooms() -> Vec<Room> {
    vec![
        Room {
            id: 1,
            name: "R1".to_string(),
            code: "R1".to_string(),
        },
        Room {
            id: 2,
            name: "R2".to_string(),
            code: "R2".to_string(),
        },
    ]
}

/// R1 holds a defense 09:00-10:00 and R2 a lecture 08:00-09:30 on Wednesdays.
pub fn create_test_schedule() -> ScheduleData {
    ScheduleData {
        rooms: create_test_rooms(),
        sessions: vec![Session {
            id: 1,
            date: defense_day(),
            start_time: time(9, 0),
            end_time: time(10, 0),
            room_id: Some(1),
            student_name: Some("Budi Santoso".to_string()),
        }],
        lecture_schedules: vec![LectureSchedule {
            room: "r2".to_string(),
            day_of_week: "Wednesday".to_string(),
            start_time: time(8, 0),
            end_time: time(9, 30),
        }],
    }
}

pub fn create_test_app() -> Router {
    create_test_app_with(AvailabilityConfig::default())
}

pub fn create_test_app_with(config: AvailabilityConfig) -> Router {
    let store = Arc::new(InMemorySchedule::new(create_test_schedule()));
    routes(state_for(store, &config))
}

pub fn fail_open_config() -> AvailabilityConfig {
    AvailabilityConfig {
        fetch_failure_policy: FetchFailurePolicy::FailOpen,
        weekday_names: WeekdayLocale::English,
    }
}

/// A source whose session reads always fail.
pub struct SessionsUnavailable;

impl ScheduleSource for SessionsUnavailable {
    fn list_rooms(&self) -> BoxFuture<'_, Vec<Room>, SchedulerError> {
        Box::pin(async { Ok(create_test_rooms()) })
    }

    fn list_sessions_for_date(
        &self,
        _date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async {
            Err(SchedulerError::SourceError {
                source_name: "sessions".to_string(),
                message: "timed out".to_string(),
            })
        })
    }

    fn list_lecture_schedules_for_day(
        &self,
        _weekday: &str,
    ) -> BoxFuture<'_, Vec<LectureSchedule>, SchedulerError> {
        Box::pin(async { Ok(Vec::new()) })
    }

    fn list_sessions(&self) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// App whose availability checks read from `SessionsUnavailable` while
/// writes still land in an in-memory store holding the test schedule.
pub fn create_unavailable_app(config: AvailabilityConfig) -> Router {
    let source: Arc<dyn ScheduleSource> = Arc::new(SessionsUnavailable);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySchedule::new(create_test_schedule()));
    let state = Arc::new(RoomsState {
        availability: Arc::new(RoomAvailabilityService::from_config(source.clone(), &config)),
        source,
        store,
    });
    routes(state)
}

/// Wraps the test schedule and counts `list_rooms` calls.
pub struct CountingSource {
    pub inner: Arc<InMemorySchedule>,
    pub room_fetches: AtomicUsize,
}

impl CountingSource {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(InMemorySchedule::new(create_test_schedule())),
            room_fetches: AtomicUsize::new(0),
        }
    }

    pub fn room_fetches(&self) -> usize {
        self.room_fetches.load(Ordering::SeqCst)
    }
}

impl ScheduleSource for CountingSource {
    fn list_rooms(&self) -> BoxFuture<'_, Vec<Room>, SchedulerError> {
        self.room_fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.list_rooms()
    }

    fn list_sessions_for_date(
        &self,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        self.inner.list_sessions_for_date(date)
    }

    fn list_lecture_schedules_for_day(
        &self,
        weekday: &str,
    ) -> BoxFuture<'_, Vec<LectureSchedule>, SchedulerError> {
        self.inner.list_lecture_schedules_for_day(weekday)
    }

    fn list_sessions(&self) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        self.inner.list_sessions()
    }
}

/// App reading through `source` and writing into the same schedule.
pub fn create_counting_app(source: Arc<CountingSource>) -> Router {
    let store: Arc<dyn SessionStore> = source.inner.clone();
    let reads: Arc<dyn ScheduleSource> = source;
    let state = Arc::new(RoomsState {
        availability: Arc::new(RoomAvailabilityService::from_config(
            reads.clone(),
            &AvailabilityConfig::default(),
        )),
        source: reads,
        store,
    });
    routes(state)
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Null` for an empty body).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub fn room_ids(body: &serde_json::Value) -> Vec<i64> {
    body["rooms"]
        .as_array()
        .map(|rooms| rooms.iter().filter_map(|r| r["id"].as_i64()).collect())
        .unwrap_or_default()
}
