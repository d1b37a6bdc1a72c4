//! Login session database operations
//!
//! Sessions are server-side: the browser only ever holds an opaque session
//! id, and the admin role is re-read from the users table on every request.

use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::db::models::{Session, User};
use crate::Result;

/// Create a session for a user and return it
pub async fn create(pool: &SqlitePool, user_id: &str) -> Result<Session> {
    let session = Session {
        id: Uuid::new_v4().to_string(),
        user_id: user_id.to_string(),
        created_at: super::now_rfc3339(),
    };

    sqlx::query("INSERT INTO sessions (id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(&session.id)
        .bind(&session.user_id)
        .bind(&session.created_at)
        .execute(pool)
        .await?;

    Ok(session)
}

/// Resolve a session id to its user, if the session is still live
pub async fn user_for_session(pool: &SqlitePool, session_id: &str) -> Result<Option<User>> {
    let row = sqlx::query(
        r#"
        SELECT u.id, u.email, u.admin, u.created_at
        FROM sessions s
        JOIN users u ON u.id = s.user_id
        WHERE s.id = ?
        "#,
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| super::users::user_from_row(&row)))
}

/// Delete a session; deleting an unknown id is not an error
pub async fn delete(pool: &SqlitePool, session_id: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE id = ?")
        .bind(session_id)
        .execute(pool)
        .await?;

    Ok(())
}
