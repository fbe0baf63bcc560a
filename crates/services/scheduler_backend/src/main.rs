// File: crates/services/scheduler_backend/src/main.rs
mod app_state;

use app_state::AppState;
use scheduler_common::logging::{init_from_config, log_error, log_result};
use scheduler_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        log_error(&err, "Scheduler backend stopped");
        eprintln!("Scheduler backend stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Arc::new(load_config()?);
    // Keeps the file writer flushing until shutdown.
    let _log_guard = init_from_config(&config.logging);

    let state = log_result(
        AppState::new(config).await,
        "Application state ready",
        "Failed to build application state",
    )?;
    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = state.api_router();

    #[cfg(feature = "openapi")]
    {
        use scheduler_rooms::doc::RoomsApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Thesis Defense Scheduler API",
                version = "0.1.0",
                description = "Room availability and defense session booking",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags((name = "health", description = "Service health")),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(RoomsApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");
        app = app.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc));
    }

    let app = app.layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
