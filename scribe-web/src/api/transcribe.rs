//! Crowdsourced transcription flow
//!
//! `/transcribe/<key>` serves a recording to transcribe: a numeric key names
//! one recording directly, anything else is treated as a model id and picks
//! a random recording for that model. Submissions land in
//! `/save-transcription` and bounce back to the caller-supplied back link.

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use scribe_common::db::{recordings, transcriptions};
use scribe_common::db::transcriptions::TranscriptionFlags;

use crate::error::{PageError, PageResult};
use crate::{auth, ui, AppState};

use super::{chrome, page_response};

#[derive(Debug, Deserialize)]
pub struct TranscribeQuery {
    /// Where the "skip" link and the post-save redirect should lead
    pub next: Option<String>,
}

/// GET /transcribe/:key
pub async fn transcribe(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(key): Path<String>,
    Query(query): Query<TranscribeQuery>,
) -> PageResult<Response> {
    let (recording, backlink) = match key.parse::<i64>() {
        Ok(id) => {
            let recording = recordings::get(&state.db, id)
                .await?
                .ok_or_else(|| PageError::NotFound(format!("recording {}", id)))?;

            let backlink = query
                .next
                .as_deref()
                .filter(|next| is_local_path(next))
                .map(str::to_string)
                .unwrap_or_else(|| format!("/transcribe/{}", recording.model));

            (recording, backlink)
        }
        Err(_) => {
            let recording = recordings::get_random_for_model(&state.db, &key)
                .await?
                .ok_or_else(|| PageError::NotFound(format!("recordings for model {}", key)))?;

            let backlink = format!("/transcribe/{}", recording.model);
            (recording, backlink)
        }
    };

    let chrome = chrome(&state, &headers).await?;
    let html = ui::layout(
        &state.config,
        "Transcribe",
        chrome.viewer.as_ref(),
        chrome.flash.as_deref(),
        &ui::transcribe_body(&recording, &backlink),
    );

    Ok(page_response(html, chrome.flash.is_some()))
}

#[derive(Debug, Deserialize)]
pub struct SaveTranscriptionForm {
    pub id: i64,
    pub transcription: String,
    pub backlink: Option<String>,
    // Checkboxes arrive only when ticked
    pub native_speaker: Option<String>,
    pub offensive_language: Option<String>,
    pub not_a_speech: Option<String>,
}

/// POST /save-transcription
pub async fn save_transcription(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SaveTranscriptionForm>,
) -> PageResult<Response> {
    // Reject dangling recording ids with a 404 page rather than a
    // foreign-key failure
    recordings::get(&state.db, form.id)
        .await?
        .ok_or_else(|| PageError::NotFound(format!("recording {}", form.id)))?;

    let user = auth::current_user(&state.db, &headers).await?;

    let flags = TranscriptionFlags {
        native_speaker: form.native_speaker.is_some(),
        offensive_language: form.offensive_language.is_some(),
        not_a_speech: form.not_a_speech.is_some(),
    };

    transcriptions::add(
        &state.db,
        form.id,
        user.as_ref().map(|u| u.id.as_str()),
        &form.transcription,
        flags,
    )
    .await?;

    let backlink = form
        .backlink
        .as_deref()
        .filter(|link| is_local_path(link))
        .unwrap_or("/");

    Ok((
        [(
            header::SET_COOKIE,
            auth::flash_cookie("Recording was successfully transcribed"),
        )],
        Redirect::to(backlink),
    )
        .into_response())
}

/// Only same-site paths are honored as redirect targets
fn is_local_path(link: &str) -> bool {
    link.starts_with('/') && !link.starts_with("//")
}
