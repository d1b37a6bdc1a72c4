//! Integration tests for the public routes
//!
//! Tests cover:
//! - Landing, demo and documentation pages
//! - Available workers JSON listing
//! - Transcribe flow: model vs id lookup, back links, submission
//! - Health endpoint and 404 fallback

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use scribe_common::config::WebConfig;
use scribe_common::db::{recordings, transcriptions, worker_types};
use scribe_web::auth::google::GoogleLogin;
use scribe_web::{build_router, AppState};

/// Test helper: in-memory database with the full schema
async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should open");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("pragma should apply");

    scribe_common::db::create_schema(&pool)
        .await
        .expect("schema should create");

    pool
}

fn test_config() -> WebConfig {
    WebConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        public_url: "http://localhost:8000".to_string(),
        database_path: ":memory:".to_string(),
        google_client_id: "client-id".to_string(),
        google_client_secret: "client-secret".to_string(),
        api_url: "https://api.example.org".to_string(),
        ga_tracking_id: None,
    }
}

/// Test helper: app over the given pool
fn setup_app(pool: SqlitePool) -> Router {
    let config = Arc::new(test_config());
    let google = Arc::new(GoogleLogin::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.oauth_redirect_url(),
    ));

    build_router(AppState::new(pool, config, google))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    String::from_utf8(bytes.to_vec()).expect("Body should be UTF-8")
}

async fn body_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Body should be JSON")
}

async fn seed_recordings(pool: &SqlitePool) -> i64 {
    worker_types::save(pool, "en-GB", "English (GB)", "British English model")
        .await
        .expect("worker");
    worker_types::set_available(pool, "en-GB", true)
        .await
        .expect("flag");
    worker_types::save(pool, "cs", "Czech", "Czech model")
        .await
        .expect("worker");

    let recording = recordings::add(
        pool,
        "en-GB",
        "/data/en-1.wav",
        "https://cdn.example.org/en-1.wav",
    )
    .await
    .expect("recording");

    recording.id
}

// =============================================================================
// Public pages
// =============================================================================

#[tokio::test]
async fn test_index_renders() {
    let app = setup_app(setup_pool().await);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Scribe"));
    assert!(html.contains("/login/google"));
}

#[tokio::test]
async fn test_demo_embeds_api_url_and_model() {
    let app = setup_app(setup_pool().await);

    let response = app.clone().oneshot(get("/demo")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"data-api-url="https://api.example.org""#));
    assert!(!html.contains("data-model"));

    let response = app.oneshot(get("/demo/en-GB")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"data-model="en-GB""#));
}

#[tokio::test]
async fn test_documentation_renders() {
    let app = setup_app(setup_pool().await);

    let response = app.oneshot(get("/documentation")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("https://api.example.org"));
}

#[tokio::test]
async fn test_worker_types_lists_models_without_admin_links() {
    let pool = setup_pool().await;
    seed_recordings(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/worker-types")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("en-GB"));
    assert!(html.contains("Czech"));
    assert!(!html.contains("/edit-worker/"));
}

#[tokio::test]
async fn test_available_workers_filters_unavailable() {
    let pool = setup_pool().await;
    seed_recordings(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/available-workers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    let workers = body["workers"].as_array().unwrap();
    assert_eq!(workers.len(), 1);
    assert_eq!(workers[0]["id"], "en-GB");
}

// =============================================================================
// Transcribe flow
// =============================================================================

#[tokio::test]
async fn test_transcribe_by_model_picks_recording() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;
    let app = setup_app(pool);

    let response = app.oneshot(get("/transcribe/en-GB")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("https://cdn.example.org/en-1.wav"));
    assert!(html.contains(&format!(r#"name="id" value="{}""#, id)));
    // Back link points at another random recording for the model
    assert!(html.contains(r#"name="backlink" value="/transcribe/en-GB""#));
}

#[tokio::test]
async fn test_transcribe_by_id_honors_next_param() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;
    let app = setup_app(pool);

    let uri = format!("/transcribe/{}?next=/recordings/en-GB/2", id);
    let response = app.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"name="backlink" value="/recordings/en-GB/2""#));

    // Without `next` the back link falls back to the recording's model
    let response = app
        .oneshot(get(&format!("/transcribe/{}", id)))
        .await
        .unwrap();
    let html = body_text(response.into_body()).await;
    assert!(html.contains(r#"name="backlink" value="/transcribe/en-GB""#));
}

#[tokio::test]
async fn test_transcribe_by_id_rejects_external_next() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;
    let app = setup_app(pool);

    let uri = format!("/transcribe/{}?next=https://evil.example.org/", id);
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response.into_body()).await;
    assert!(!html.contains("evil.example.org"));
    assert!(html.contains(r#"name="backlink" value="/transcribe/en-GB""#));
}

#[tokio::test]
async fn test_transcribe_unknown_model_is_404() {
    let pool = setup_pool().await;
    seed_recordings(&pool).await;
    let app = setup_app(pool);

    let response = app.clone().oneshot(get("/transcribe/xx-XX")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(get("/transcribe/4242")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_save_transcription_persists_and_redirects() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;
    let app = setup_app(pool.clone());

    let body = format!(
        "id={}&transcription=hello%20world&backlink=%2Ftranscribe%2Fen-GB&native_speaker=on&not_a_speech=on",
        id
    );
    let response = app
        .oneshot(post_form("/save-transcription", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/transcribe/en-GB"
    );

    // Flash notice travels in the one-shot cookie
    let cookies: Vec<&str> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("scribe_flash=")));

    let saved = transcriptions::list_for_recording(&pool, id)
        .await
        .expect("list");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].text, "hello world");
    assert_eq!(saved[0].user_id, None, "anonymous submission");
    assert!(saved[0].native_speaker);
    assert!(!saved[0].offensive_language);
    assert!(saved[0].not_a_speech);
}

#[tokio::test]
async fn test_save_transcription_rejects_external_backlink() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;
    let app = setup_app(pool);

    let body = format!(
        "id={}&transcription=x&backlink=https%3A%2F%2Fevil.example.org%2F",
        id
    );
    let response = app
        .oneshot(post_form("/save-transcription", &body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

#[tokio::test]
async fn test_save_transcription_unknown_recording_is_404() {
    let pool = setup_pool().await;
    seed_recordings(&pool).await;
    let app = setup_app(pool.clone());

    let response = app
        .oneshot(post_form(
            "/save-transcription",
            "id=4242&transcription=x&backlink=%2F",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_flash_shown_once_then_cleared() {
    let pool = setup_pool().await;
    seed_recordings(&pool).await;
    let app = setup_app(pool);

    // A pending flash cookie renders as a notice and the response clears it
    let request = Request::builder()
        .method("GET")
        .uri("/")
        .header(
            header::COOKIE,
            // base64url of "Recording was successfully transcribed"
            "scribe_flash=UmVjb3JkaW5nIHdhcyBzdWNjZXNzZnVsbHkgdHJhbnNjcmliZWQ",
        )
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cleared = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .any(|v| {
            let v = v.to_str().unwrap();
            v.starts_with("scribe_flash=") && v.contains("Max-Age=0")
        });
    assert!(cleared, "flash cookie should be cleared after rendering");

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Recording was successfully transcribed"));
}

// =============================================================================
// Health and fallback
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let app = setup_app(setup_pool().await);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "scribe-web");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_renders_404_page() {
    let app = setup_app(setup_pool().await);

    let response = app.oneshot(get("/no-such-page")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let html = body_text(response.into_body()).await;
    assert!(html.contains("Page not found"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let app = setup_app(setup_pool().await);

    let response = app.clone().oneshot(get("/static/scribe.css")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );

    let response = app.oneshot(get("/static/demo.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/javascript"
    );
}

#[tokio::test]
async fn test_logged_in_submission_is_attributed() {
    let pool = setup_pool().await;
    let id = seed_recordings(&pool).await;

    let user = scribe_common::db::users::upsert_user(&pool, "subject-9", "person@example.org")
        .await
        .expect("user");
    let session = scribe_common::db::sessions::create(&pool, &user.id)
        .await
        .expect("session");

    let app = setup_app(pool.clone());

    let request = Request::builder()
        .method("POST")
        .uri("/save-transcription")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header(header::COOKIE, format!("scribe_session={}", session.id))
        .body(Body::from(format!(
            "id={}&transcription=attributed&backlink=%2F",
            id
        )))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let saved = transcriptions::list_for_recording(&pool, id)
        .await
        .expect("list");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].user_id.as_deref(), Some("subject-9"));
    assert!(!saved[0].native_speaker, "unchecked boxes stay false");
}
