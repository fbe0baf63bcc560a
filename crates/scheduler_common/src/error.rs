use std::fmt;
use thiserror::Error;

/// The base error type for the scheduler.
///
/// Crates with their own error types (the database adapter, for instance)
/// implement `From<TheirError> for SchedulerError` so results can be passed up
/// with `?` into the HTTP layer.
#[derive(Error, Debug)]
pub enum SchedulerError {
    /// A date, time or payload could not be parsed
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Input was well-formed but not acceptable (e.g. start_time >= end_time)
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// A read from the booking data source failed
    #[error("Data source error: {source_name} - {message}")]
    SourceError {
        source_name: String,
        message: String,
    },

    /// The requested room is already booked for an overlapping slot
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// Error occurred due to a resource not being found
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// Bookings could not be fetched and the fail-closed policy is active
    #[error("Could not verify room availability: {0}")]
    AvailabilityUnknown(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for SchedulerError {
    fn status_code(&self) -> u16 {
        match self {
            SchedulerError::ParseError(_) => 400,
            SchedulerError::ConfigError(_) => 500,
            SchedulerError::ValidationError(_) => 400,
            SchedulerError::DatabaseError(_) => 500,
            SchedulerError::SourceError { .. } => 502,
            SchedulerError::ConflictError(_) => 409,
            SchedulerError::NotFoundError(_) => 404,
            SchedulerError::AvailabilityUnknown(_) => 503,
            SchedulerError::InternalError(_) => 500,
        }
    }
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, SchedulerError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, SchedulerError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, SchedulerError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| SchedulerError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, SchedulerError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| SchedulerError::InternalError(format!("{}: {}", f(), error)))
    }
}

impl From<serde_json::Error> for SchedulerError {
    fn from(err: serde_json::Error) -> Self {
        SchedulerError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for SchedulerError {
    fn from(err: std::io::Error) -> Self {
        SchedulerError::InternalError(err.to_string())
    }
}

impl From<chrono::ParseError> for SchedulerError {
    fn from(err: chrono::ParseError) -> Self {
        SchedulerError::ParseError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> SchedulerError {
    SchedulerError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> SchedulerError {
    SchedulerError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> SchedulerError {
    SchedulerError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> SchedulerError {
    SchedulerError::ConflictError(message.to_string())
}

pub fn source_error<T: fmt::Display>(source_name: &str, message: T) -> SchedulerError {
    SchedulerError::SourceError {
        source_name: source_name.to_string(),
        message: message.to_string(),
    }
}

pub fn internal_error<T: fmt::Display>(message: T) -> SchedulerError {
    SchedulerError::InternalError(message.to_string())
}
