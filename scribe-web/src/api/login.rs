//! Login and logout handlers
//!
//! `/login/google` serves double duty, like the provider expects: a request
//! without a `code` starts the flow by redirecting to Google, and the
//! callback comes back to the same path with `code` and `state` set.

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use scribe_common::db::models::{Session, User};
use scribe_common::db::{sessions, users};

use crate::error::PageResult;
use crate::{auth, AppState};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /login/google
pub async fn login_google(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoginQuery>,
) -> PageResult<Response> {
    if let Some(provider_error) = &query.error {
        warn!(error = %provider_error, "login refused by provider");
        return Ok(flash_redirect("/", "Sign in was cancelled"));
    }

    let code = match &query.code {
        None => {
            // Start of the flow: mint a state token and hand off to Google
            let oauth_state = Uuid::new_v4().to_string();
            let url = state.google.authorization_url(&oauth_state);

            return Ok((
                AppendHeaders([(header::SET_COOKIE, auth::oauth_state_cookie(&oauth_state))]),
                Redirect::to(&url),
            )
                .into_response());
        }
        Some(code) => code,
    };

    // Callback: the state must match the value minted at the start
    let expected_state = auth::cookie_value(&headers, auth::OAUTH_STATE_COOKIE);
    if expected_state.is_none() || expected_state != query.state {
        warn!("login state mismatch");
        return Ok(flash_redirect("/", "Sign in failed, please try again"));
    }

    match complete_login(&state, code).await {
        Ok((session, user)) => {
            info!(user = %user.email, "login successful");

            Ok((
                AppendHeaders([
                    (header::SET_COOKIE, auth::session_cookie(&session.id)),
                    (header::SET_COOKIE, auth::clear_oauth_state_cookie()),
                    (
                        header::SET_COOKIE,
                        auth::flash_cookie(&format!("Signed in as {}", user.email)),
                    ),
                ]),
                Redirect::to("/"),
            )
                .into_response())
        }
        Err(err) => {
            warn!(error = %err, "login failed");
            Ok(flash_redirect("/", "Sign in failed, please try again"))
        }
    }
}

/// Exchange the code, fetch the user's identity, and open a session
async fn complete_login(
    state: &AppState,
    code: &str,
) -> scribe_common::Result<(Session, User)> {
    let token = state.google.exchange_code(code).await?;
    let info = state.google.fetch_userinfo(&token.access_token).await?;

    let email = info.email.ok_or_else(|| {
        scribe_common::Error::Internal("userinfo response carried no email".to_string())
    })?;

    let user = users::upsert_user(&state.db, &info.sub, &email).await?;
    let session = sessions::create(&state.db, &user.id).await?;

    Ok((session, user))
}

/// GET /logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> PageResult<Response> {
    if let Some(session_id) = auth::cookie_value(&headers, auth::SESSION_COOKIE) {
        sessions::delete(&state.db, &session_id).await?;
    }

    Ok((
        AppendHeaders([(header::SET_COOKIE, auth::clear_session_cookie())]),
        Redirect::to("/"),
    )
        .into_response())
}

fn flash_redirect(to: &str, message: &str) -> Response {
    (
        [(header::SET_COOKIE, auth::flash_cookie(message))],
        Redirect::to(to),
    )
        .into_response()
}
