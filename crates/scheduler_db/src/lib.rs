//! SQL persistence for the room scheduler
//!
//! Provides a database client over an `sqlx::Any` pool and a repository that
//! serves rooms, defense sessions and lecture schedules to the availability
//! checker. Only SQLite URLs are accepted.
//!
//! # Example
//!
//! ```rust,no_run
//! use scheduler_db::{DbClient, SqlScheduleRepository};
//!
//! async fn setup_db() -> Result<SqlScheduleRepository, Box<dyn std::error::Error>> {
//!     let client = DbClient::from_url("sqlite:data/scheduler.db").await?;
//!     let repository = SqlScheduleRepository::new(client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

pub use client::DbClient;
pub use error::DbError;
pub use repositories::SqlScheduleRepository;
