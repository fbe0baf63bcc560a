// --- File: crates/services/scheduler_backend/src/app_state.rs ---
use axum::{extract::State, routing::get, Json, Router};
use scheduler_common::SchedulerError;
use scheduler_config::AppConfig;
use scheduler_rooms::handlers::RoomsState;
use scheduler_rooms::memory::InMemorySchedule;
use scheduler_rooms::routes::{routes as rooms_routes, state_for};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

#[cfg(feature = "database")]
use scheduler_db::{DbClient, SqlScheduleRepository};

/// Application state shared across all routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub rooms: Arc<RoomsState>,
    /// Present when the sessions live in a database.
    #[cfg(feature = "database")]
    pub db_client: Option<DbClient>,
}

#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<bool>,
}

impl AppState {
    /// Picks the booking store from the configuration: the SQL repository when
    /// `use_database` is set, otherwise the in-memory store seeded from
    /// `fixtures_path` (or empty).
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, SchedulerError> {
        if config.use_database {
            #[cfg(feature = "database")]
            {
                let client = DbClient::new(&config).await?;
                let repository = Arc::new(SqlScheduleRepository::new(client.clone()));
                repository.init_schema().await?;
                if config.fixtures_path.is_some() {
                    warn!("fixtures_path is ignored when use_database is set");
                }
                info!("Serving bookings from the database");
                return Ok(Self {
                    rooms: state_for(repository, &config.availability),
                    db_client: Some(client),
                    config,
                });
            }
            #[cfg(not(feature = "database"))]
            return Err(scheduler_common::config_error(
                "use_database is set but the backend was built without the database feature",
            ));
        }

        let store = match config.fixtures_path.as_deref() {
            Some(path) => InMemorySchedule::from_json_file(path)?,
            None => {
                warn!("No database and no fixtures_path configured; starting with an empty schedule");
                InMemorySchedule::default()
            }
        };
        info!("Serving bookings from memory");
        Ok(Self::in_memory(config, store))
    }

    pub fn in_memory(config: Arc<AppConfig>, store: InMemorySchedule) -> Self {
        Self {
            rooms: state_for(Arc::new(store), &config.availability),
            #[cfg(feature = "database")]
            db_client: None,
            config,
        }
    }

    /// Routes under `/api`: the room and session endpoints plus `/health`.
    pub fn api_router(&self) -> Router {
        let health = Router::new()
            .route("/health", get(health_handler))
            .with_state(self.clone());
        Router::new().nest("/api", rooms_routes(self.rooms.clone()).merge(health))
    }
}

#[axum::debug_handler]
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    #[cfg(feature = "database")]
    let database = match &state.db_client {
        Some(client) => Some(client.is_healthy().await),
        None => None,
    };
    #[cfg(not(feature = "database"))]
    let database = {
        let _ = &state;
        None
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
