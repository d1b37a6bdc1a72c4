//! Session, identity and role handling
//!
//! The browser holds an opaque session id in a cookie; everything else
//! (user id, email, admin flag) lives server-side in the database and is
//! re-read on every request. Flash notices travel in a one-shot cookie so
//! anonymous submitters get them too.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sqlx::SqlitePool;

use scribe_common::db::models::User;
use scribe_common::db::sessions;

use crate::error::{PageError, PageResult};
use crate::AppState;

pub mod google;

/// Login session cookie
pub const SESSION_COOKIE: &str = "scribe_session";
/// One-shot notice cookie, cleared by the next page render
pub const FLASH_COOKIE: &str = "scribe_flash";
/// OAuth state parameter cookie, spans the round trip to the provider
pub const OAUTH_STATE_COOKIE: &str = "scribe_oauth_state";

/// Extract a cookie value from the request headers
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let raw = match header_value.to_str() {
            Ok(raw) => raw,
            Err(_) => continue,
        };

        for pair in raw.split(';') {
            if let Some((key, value)) = pair.trim().split_once('=') {
                if key == name {
                    return Some(value.to_string());
                }
            }
        }
    }

    None
}

/// Set-Cookie value establishing a login session
pub fn session_cookie(session_id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE, session_id
    )
}

/// Set-Cookie value expiring the login session cookie
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Set-Cookie value carrying the OAuth state across the provider round trip
pub fn oauth_state_cookie(state: &str) -> String {
    format!(
        "{}={}; Path=/login/google; HttpOnly; SameSite=Lax; Max-Age=600",
        OAUTH_STATE_COOKIE, state
    )
}

/// Set-Cookie value expiring the OAuth state cookie
pub fn clear_oauth_state_cookie() -> String {
    format!(
        "{}=; Path=/login/google; HttpOnly; SameSite=Lax; Max-Age=0",
        OAUTH_STATE_COOKIE
    )
}

/// Set-Cookie value carrying a one-shot notice to the next page view
///
/// The message is base64url-encoded so arbitrary text survives the cookie
/// value grammar.
pub fn flash_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age=60",
        FLASH_COOKIE,
        URL_SAFE_NO_PAD.encode(message.as_bytes())
    )
}

/// Set-Cookie value expiring the flash cookie
pub fn clear_flash_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
}

/// Read the pending flash notice, if any
pub fn take_flash(headers: &HeaderMap) -> Option<String> {
    let encoded = cookie_value(headers, FLASH_COOKIE)?;
    let bytes = URL_SAFE_NO_PAD.decode(encoded.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Resolve the requesting user from the session cookie
///
/// Missing cookie, dangling session, and deleted user all resolve to None;
/// only a database failure is an error.
pub async fn current_user(pool: &SqlitePool, headers: &HeaderMap) -> PageResult<Option<User>> {
    let session_id = match cookie_value(headers, SESSION_COOKIE) {
        Some(id) => id,
        None => return Ok(None),
    };

    Ok(sessions::user_for_session(pool, &session_id).await?)
}

/// Admin gate middleware, fails closed with the rendered 403 page
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, PageError> {
    let user = current_user(&state.db, request.headers()).await?;

    match user {
        Some(user) if user.admin => Ok(next.run(request).await),
        _ => Err(PageError::Forbidden),
    }
}
