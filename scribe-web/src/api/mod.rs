//! HTTP handlers for scribe-web

use axum::{
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
};

use scribe_common::db::models::User;

use crate::error::PageResult;
use crate::{auth, AppState};

pub mod assets;
pub mod health;
pub mod login;
pub mod pages;
pub mod recordings;
pub mod transcribe;
pub mod workers;

/// Per-request page chrome: the requesting user and any pending flash notice
pub(crate) struct Chrome {
    pub viewer: Option<User>,
    pub flash: Option<String>,
}

/// Resolve the page chrome from the request headers
pub(crate) async fn chrome(state: &AppState, headers: &HeaderMap) -> PageResult<Chrome> {
    Ok(Chrome {
        viewer: auth::current_user(&state.db, headers).await?,
        flash: auth::take_flash(headers),
    })
}

/// Wrap a rendered page, clearing the one-shot flash cookie if it was shown
pub(crate) fn page_response(html: String, had_flash: bool) -> Response {
    if had_flash {
        (
            [(header::SET_COOKIE, auth::clear_flash_cookie())],
            Html(html),
        )
            .into_response()
    } else {
        Html(html).into_response()
    }
}
