//! Admin review handlers
//!
//! Both routes sit behind the admin gate in the router; by the time these
//! handlers run the role check has already passed.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};

use scribe_common::db::{recordings, transcriptions};

use crate::error::{PageError, PageResult};
use crate::pagination::{calculate_pagination, PAGE_SIZE};
use crate::{ui, AppState};

use super::{chrome, page_response};

/// GET /recordings/:model/:page
pub async fn list_recordings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((model, page)): Path<(String, i64)>,
) -> PageResult<Response> {
    let total = recordings::count_for_model(&state.db, &model).await?;
    let pagination = calculate_pagination(total, page);

    let items =
        recordings::list_for_model(&state.db, &model, PAGE_SIZE, pagination.offset).await?;

    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        &format!("Recordings: {}", model),
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::recordings_body(&model, &items, &pagination),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

/// GET /transcriptions/:id
pub async fn review_transcriptions(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> PageResult<Response> {
    let recording = recordings::get(&state.db, id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("recording {}", id)))?;

    let submissions = transcriptions::list_for_recording(&state.db, id).await?;

    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        &format!("Recording #{}", id),
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::transcriptions_body(&recording, &submissions),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}
