//! Repositories for database access

pub mod schedule_sql;

pub use schedule_sql::SqlScheduleRepository;
