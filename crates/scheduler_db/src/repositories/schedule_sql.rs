//! SQL implementation of the schedule source and session store
//!
//! Dates are stored as `YYYY-MM-DD` text and times as `HH:MM:SS` text. Both
//! formats sort lexicographically in chronological order, which the overlap
//! query relies on.

use crate::error::DbError;
use crate::DbClient;
use chrono::{NaiveDate, NaiveTime};
use scheduler_common::models::time_of_day;
use scheduler_common::{
    conflict, not_found, validation_error, BoxFuture, LectureSchedule, NewSession, Room,
    ScheduleSource, SchedulerError, Session, SessionId, SessionStore,
};
use sqlx::any::AnyRow;
use sqlx::AnyConnection;
use sqlx::Row;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

const DATE_FORMAT: &str = "%Y-%m-%d";

const SESSION_COLUMNS: &str = "id, date, start_time, end_time, room_id, student_name";

/// Session ids come from AUTOINCREMENT and start at 1, so 0 never matches.
const NO_SESSION: SessionId = 0;

#[derive(Debug, Clone)]
pub struct SqlScheduleRepository {
    db_client: DbClient,
    // Serializes session writes within this process; the transaction covers
    // the check and the write against other connections.
    write_lock: Arc<Mutex<()>>,
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_time(time: NaiveTime) -> String {
    time.format(time_of_day::FORMAT).to_string()
}

fn decode_date(row: &AnyRow, column: &'static str) -> Result<NaiveDate, DbError> {
    let value: String = row.try_get(column)?;
    NaiveDate::parse_from_str(&value, DATE_FORMAT)
        .map_err(|_| DbError::DecodeError { column, value })
}

fn decode_time(row: &AnyRow, column: &'static str) -> Result<NaiveTime, DbError> {
    let value: String = row.try_get(column)?;
    time_of_day::parse(&value).map_err(|_| DbError::DecodeError { column, value })
}

fn room_from_row(row: &AnyRow) -> Result<Room, DbError> {
    Ok(Room {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        code: row.try_get("code")?,
    })
}

fn session_from_row(row: &AnyRow) -> Result<Session, DbError> {
    Ok(Session {
        id: row.try_get("id")?,
        date: decode_date(row, "date")?,
        start_time: decode_time(row, "start_time")?,
        end_time: decode_time(row, "end_time")?,
        room_id: row.try_get("room_id")?,
        student_name: row.try_get("student_name")?,
    })
}

fn lecture_from_row(row: &AnyRow) -> Result<LectureSchedule, DbError> {
    Ok(LectureSchedule {
        room: row.try_get("room")?,
        day_of_week: row.try_get("day_of_week")?,
        start_time: decode_time(row, "start_time")?,
        end_time: decode_time(row, "end_time")?,
    })
}

/// Rejects unknown rooms and slots overlapping another session in the same
/// room. Runs on the write transaction's connection.
async fn check_room_is_free(
    conn: &mut AnyConnection,
    session: &NewSession,
    ignore: SessionId,
) -> Result<(), SchedulerError> {
    let Some(room_id) = session.room_id else {
        return Ok(());
    };

    let known = sqlx::query("SELECT id FROM rooms WHERE id = $1")
        .bind(room_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(DbError::from)?;
    if known.is_none() {
        return Err(validation_error(format!("Unknown room {}", room_id)));
    }

    let clash = sqlx::query(
        r#"
        SELECT id FROM sessions
        WHERE room_id = $1 AND date = $2 AND start_time < $3 AND end_time > $4 AND id <> $5
        LIMIT 1
        "#,
    )
    .bind(room_id)
    .bind(format_date(session.date))
    .bind(format_time(session.end_time))
    .bind(format_time(session.start_time))
    .bind(ignore)
    .fetch_optional(&mut *conn)
    .await
    .map_err(DbError::from)?;

    match clash {
        Some(row) => {
            let other: SessionId = row.try_get("id").map_err(DbError::from)?;
            Err(conflict(format!(
                "Room {} is already booked by session {} on {}",
                room_id, other, session.date
            )))
        }
        None => Ok(()),
    }
}

impl SqlScheduleRepository {
    pub fn new(db_client: DbClient) -> Self {
        Self {
            db_client,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn client(&self) -> &DbClient {
        &self.db_client
    }

    /// Creates the `rooms`, `sessions` and `lecture_schedules` tables if missing.
    pub async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing schedule schema");

        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS rooms (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    code TEXT NOT NULL
                )
                "#,
            )
            .await?;
        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS sessions (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    date TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL,
                    room_id INTEGER REFERENCES rooms(id),
                    student_name TEXT
                )
                "#,
            )
            .await?;
        self.db_client
            .execute("CREATE INDEX IF NOT EXISTS idx_sessions_date_room ON sessions (date, room_id)")
            .await?;
        self.db_client
            .execute(
                r#"
                CREATE TABLE IF NOT EXISTS lecture_schedules (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    room TEXT NOT NULL,
                    day_of_week TEXT NOT NULL,
                    start_time TEXT NOT NULL,
                    end_time TEXT NOT NULL
                )
                "#,
            )
            .await?;

        info!("Schedule schema initialized successfully");
        Ok(())
    }

    pub async fn insert_room(&self, name: &str, code: &str) -> Result<Room, DbError> {
        let row = sqlx::query("INSERT INTO rooms (name, code) VALUES ($1, $2) RETURNING id, name, code")
            .bind(name)
            .bind(code)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert room: {}", e);
                DbError::QueryError(e.to_string())
            })?;
        room_from_row(&row)
    }

    pub async fn insert_lecture_schedule(&self, lecture: &LectureSchedule) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO lecture_schedules (room, day_of_week, start_time, end_time)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&lecture.room)
        .bind(&lecture.day_of_week)
        .bind(format_time(lecture.start_time))
        .bind(format_time(lecture.end_time))
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to insert lecture schedule: {}", e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(())
    }

    async fn fetch_rooms(&self) -> Result<Vec<Room>, DbError> {
        let rows = sqlx::query("SELECT id, name, code FROM rooms ORDER BY id")
            .fetch_all(self.db_client.pool())
            .await?;
        rows.iter().map(room_from_row).collect()
    }

    async fn fetch_sessions(&self, date: Option<NaiveDate>) -> Result<Vec<Session>, DbError> {
        let rows = match date {
            Some(date) => {
                sqlx::query(&format!(
                    "SELECT {} FROM sessions WHERE date = $1 ORDER BY id",
                    SESSION_COLUMNS
                ))
                .bind(format_date(date))
                .fetch_all(self.db_client.pool())
                .await?
            }
            None => {
                sqlx::query(&format!("SELECT {} FROM sessions ORDER BY id", SESSION_COLUMNS))
                    .fetch_all(self.db_client.pool())
                    .await?
            }
        };
        rows.iter().map(session_from_row).collect()
    }

    async fn fetch_session(&self, id: SessionId) -> Result<Option<Session>, DbError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM sessions WHERE id = $1",
            SESSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(self.db_client.pool())
        .await?;
        row.as_ref().map(session_from_row).transpose()
    }

    async fn fetch_lectures(&self, weekday: &str) -> Result<Vec<LectureSchedule>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT room, day_of_week, start_time, end_time
            FROM lecture_schedules
            WHERE day_of_week = $1
            ORDER BY id
            "#,
        )
        .bind(weekday)
        .fetch_all(self.db_client.pool())
        .await?;
        rows.iter().map(lecture_from_row).collect()
    }

    async fn insert_session(&self, session: NewSession) -> Result<Session, SchedulerError> {
        session.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db_client.begin().await?;

        check_room_is_free(&mut tx, &session, NO_SESSION).await?;
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO sessions (date, start_time, end_time, room_id, student_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {}
            "#,
            SESSION_COLUMNS
        ))
        .bind(format_date(session.date))
        .bind(format_time(session.start_time))
        .bind(format_time(session.end_time))
        .bind(session.room_id)
        .bind(session.student_name.clone())
        .fetch_one(&mut *tx)
        .await
        .map_err(DbError::from)?;
        let created = session_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        debug!("Created session {}", created.id);
        Ok(created)
    }

    async fn replace_session(
        &self,
        id: SessionId,
        session: NewSession,
    ) -> Result<Session, SchedulerError> {
        session.validate()?;
        let _guard = self.write_lock.lock().await;
        let mut tx = self.db_client.begin().await?;

        let existing = sqlx::query("SELECT id FROM sessions WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::from)?;
        if existing.is_none() {
            return Err(not_found(format!("Session {}", id)));
        }

        check_room_is_free(&mut tx, &session, id).await?;
        sqlx::query(
            r#"
            UPDATE sessions
            SET date = $1, start_time = $2, end_time = $3, room_id = $4, student_name = $5
            WHERE id = $6
            "#,
        )
        .bind(format_date(session.date))
        .bind(format_time(session.start_time))
        .bind(format_time(session.end_time))
        .bind(session.room_id)
        .bind(session.student_name.clone())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(DbError::from)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;
        debug!("Updated session {}", id);
        Ok(Session::from_new(id, session))
    }

    async fn remove_session(&self, id: SessionId) -> Result<bool, DbError> {
        let _guard = self.write_lock.lock().await;
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(id)
            .execute(self.db_client.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

impl ScheduleSource for SqlScheduleRepository {
    fn list_rooms(&self) -> BoxFuture<'_, Vec<Room>, SchedulerError> {
        Box::pin(async move { Ok(self.fetch_rooms().await?) })
    }

    fn list_sessions_for_date(
        &self,
        date: NaiveDate,
    ) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async move { Ok(self.fetch_sessions(Some(date)).await?) })
    }

    fn list_lecture_schedules_for_day(
        &self,
        weekday: &str,
    ) -> BoxFuture<'_, Vec<LectureSchedule>, SchedulerError> {
        let weekday = weekday.to_string();
        Box::pin(async move { Ok(self.fetch_lectures(&weekday).await?) })
    }

    fn list_sessions(&self) -> BoxFuture<'_, Vec<Session>, SchedulerError> {
        Box::pin(async move { Ok(self.fetch_sessions(None).await?) })
    }
}

impl SessionStore for SqlScheduleRepository {
    fn get_session(&self, id: SessionId) -> BoxFuture<'_, Option<Session>, SchedulerError> {
        Box::pin(async move { Ok(self.fetch_session(id).await?) })
    }

    fn create_session(&self, session: NewSession) -> BoxFuture<'_, Session, SchedulerError> {
        Box::pin(self.insert_session(session))
    }

    fn update_session(
        &self,
        id: SessionId,
        session: NewSession,
    ) -> BoxFuture<'_, Session, SchedulerError> {
        Box::pin(self.replace_session(id, session))
    }

    fn delete_session(&self, id: SessionId) -> BoxFuture<'_, bool, SchedulerError> {
        Box::pin(async move { Ok(self.remove_session(id).await?) })
    }
}
