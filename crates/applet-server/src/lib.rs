pub mod error;
pub mod routes;
pub mod state;

use applet_core::config::Config;
use axum::routing::{get, post};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve_on()` and available for integration testing.
pub fn build_router(root: PathBuf, config: Config) -> Router {
    let app_state = state::AppState::new(root, config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Services
        .route("/api/services", get(routes::services::list_services))
        .route("/api/services/{id}", get(routes::services::get_service))
        // Applets
        .route("/api/applets", get(routes::applets::list_applets))
        .route("/api/applets/{id}", get(routes::applets::get_applet))
        .route(
            "/api/applets/{id}/toggle",
            post(routes::applets::toggle_applet),
        )
        // Activity feed
        .route(
            "/api/applets/{id}/activities",
            get(routes::activities::list_activities),
        )
        .route(
            "/api/applets/{id}/activities/latest",
            get(routes::activities::latest_activities),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the server on a pre-bound listener.
///
/// The caller binds first so it can read the actual port before starting
/// (`port = 0` lets the OS pick a free one).
pub async fn serve_on(root: PathBuf, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let config = Config::load_or_default(&root)?;
    for w in config.validate() {
        tracing::warn!("config: {}", w.message);
    }
    let app = build_router(root, config);

    tracing::info!("applet feed server listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
