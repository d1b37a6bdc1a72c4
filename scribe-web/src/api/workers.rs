//! Worker type handlers: the public availability listing and the admin
//! edit flow

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::json;

use scribe_common::db::worker_types as worker_types_db;

use crate::error::{ApiError, PageError, PageResult};
use crate::{auth, ui, AppState};

use super::{chrome, page_response};

/// GET /available-workers
///
/// JSON listing of the worker types currently marked available.
pub async fn available_workers(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let workers = worker_types_db::available_workers(&state.db).await?;

    Ok(Json(json!({ "workers": workers })))
}

/// GET /new-worker (admin)
pub async fn new_worker(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "New worker type",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::edit_worker_body(None),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// GET /edit-worker/:model (admin)
pub async fn edit_worker(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(model): Path<String>,
) -> PageResult<Response> {
    let worker = worker_types_db::get(&state.db, &model)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("worker type {}", model)))?;

    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "Edit worker type",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::edit_worker_body(Some(&worker)),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

#[derive(Debug, Deserialize)]
pub struct SaveWorkerForm {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// POST /save-worker-description (admin)
pub async fn save_worker_description(
    State(state): State<AppState>,
    Form(form): Form<SaveWorkerForm>,
) -> PageResult<Response> {
    worker_types_db::save(&state.db, form.id.trim(), &form.name, &form.description).await?;

    Ok((
        [(
            header::SET_COOKIE,
            auth::flash_cookie("Worker's description was successfully saved"),
        )],
        Redirect::to("/worker-types"),
    )
        .into_response())
}
