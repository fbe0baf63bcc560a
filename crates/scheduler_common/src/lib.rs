// --- File: crates/scheduler_common/src/lib.rs ---

// Declare modules within this crate
pub mod error;     // Error handling
pub mod http;      // Axum response mapping
pub mod logging;   // Logging utilities
pub mod models;    // Rooms, sessions, lecture schedules
pub mod services;  // Data-access abstractions


// Re-export error types and utilities for easier access
pub use error::{
    conflict,
    config_error,
    internal_error,
    not_found,
    source_error,
    validation_error,
    Context,
    HttpStatusCode,
    SchedulerError,
};

// Re-export HTTP utilities for easier access
pub use http::{handle_json_result, IntoHttpResponse};

// Re-export logging utilities for easier access
pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use models::{LectureSchedule, NewSession, Room, RoomId, Session, SessionId};
pub use services::{BoxFuture, ScheduleSource, SessionStore};
