use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_routes(state: &AppState) -> Router<AppState> {
    let system_config = &state.config.system_config;

    Router::new()
        // Translator page
        .route("/", get(handlers::index).post(handlers::submit))

        // JSON API
        .route("/api/health", get(handlers::health_check))
        .route("/api/languages", get(handlers::languages))
        .route("/api/translate", post(handlers::translate))

        // Background image and other assets
        .nest_service("/static", ServeDir::new(&system_config.static_dir))
}

/// Full application with middleware and state attached.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(create_routes(&state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
