//! scribe-web - Transcription platform web frontend
//!
//! Serves the public demo and documentation pages, the crowdsourced
//! transcription flow, and the admin review screens. Administrators sign in
//! through Google; everything else works anonymously.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use scribe_common::config::WebConfig;
use scribe_web::{auth::google::GoogleLogin, build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Scribe web frontend (scribe-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let config = WebConfig::from_env()?;
    info!("Speech API: {}", config.api_url);
    info!("OAuth redirect: {}", config.oauth_redirect_url());

    let pool = scribe_common::db::init_database(Path::new(&config.database_path)).await?;
    info!("Database connection established");

    let google = GoogleLogin::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.oauth_redirect_url(),
    );

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(pool, Arc::new(config), Arc::new(google));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("scribe-web listening on http://{}", bind_addr);
    info!("Health check: http://{}/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
