//! Public page handlers

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use scribe_common::db::worker_types as worker_types_db;

use crate::error::{PageError, PageResult};
use crate::{ui, AppState};

use super::{chrome, page_response};

/// GET /
pub async fn index(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "Home",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::index_body(),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// GET /demo
pub async fn demo(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    render_demo(state, headers, None).await
}

/// GET /demo/:model
pub async fn demo_model(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(model): Path<String>,
) -> PageResult<Response> {
    render_demo(state, headers, Some(model)).await
}

async fn render_demo(
    state: AppState,
    headers: HeaderMap,
    model: Option<String>,
) -> PageResult<Response> {
    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "Demo",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::demo_body(&state.config.api_url, model.as_deref()),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// GET /documentation
pub async fn documentation(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> PageResult<Response> {
    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "Documentation",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::documentation_body(&state.config.api_url),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// GET /worker-types
pub async fn worker_types(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> PageResult<Response> {
    let chrome = chrome(&state, &headers).await?;
    let workers = worker_types_db::list(&state.db).await?;

    let viewer_is_admin = chrome.viewer.as_ref().map(|u| u.admin).unwrap_or(false);
    let html = ui::layout(
        &state.config,
        "Worker types",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::worker_types_body(&workers, viewer_is_admin),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// Fallback for unknown routes
pub async fn not_found() -> PageError {
    PageError::NotFound("no such route".to_string())
}
