//! scribe-web library - Transcription platform web frontend
//!
//! Exposes the router and application state for integration testing.

use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

use scribe_common::config::WebConfig;

pub mod api;
pub mod auth;
pub mod error;
pub mod pagination;
pub mod ui;

pub use crate::error::{ApiError, PageError, PageResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Deployment configuration
    pub config: Arc<WebConfig>,
    /// Google OAuth client
    pub google: Arc<auth::google::GoogleLogin>,
}

impl AppState {
    pub fn new(db: SqlitePool, config: Arc<WebConfig>, google: Arc<auth::google::GoogleLogin>) -> Self {
        Self { db, config, google }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    // Admin routes: role check fails closed with the rendered 403 page
    let admin = Router::new()
        .route("/recordings/:model/:page", get(api::recordings::list_recordings))
        .route("/transcriptions/:id", get(api::recordings::review_transcriptions))
        .route("/new-worker", get(api::workers::new_worker))
        .route("/edit-worker/:model", get(api::workers::edit_worker))
        .route("/save-worker-description", post(api::workers::save_worker_description))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_admin,
        ));

    Router::new()
        .route("/", get(api::pages::index))
        .route("/demo", get(api::pages::demo))
        .route("/demo/:model", get(api::pages::demo_model))
        .route("/documentation", get(api::pages::documentation))
        .route("/worker-types", get(api::pages::worker_types))
        .route("/available-workers", get(api::workers::available_workers))
        .route("/transcribe/:key", get(api::transcribe::transcribe))
        .route("/save-transcription", post(api::transcribe::save_transcription))
        .route("/login/google", get(api::login::login_google))
        .route("/logout", get(api::login::logout))
        .route("/static/scribe.css", get(api::assets::serve_stylesheet))
        .route("/static/demo.js", get(api::assets::serve_demo_js))
        .merge(api::health::health_routes())
        .merge(admin)
        .fallback(api::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
