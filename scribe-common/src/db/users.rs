//! User database operations
//!
//! Users are created on first login and never deleted; the admin flag is
//! managed out of band (directly in the database) and must survive upserts.

use sqlx::{Row, SqlitePool};

use crate::db::models::User;
use crate::Result;

/// Insert a user on first login, or refresh the stored email on a later one
///
/// The admin flag is intentionally left untouched for existing rows.
pub async fn upsert_user(pool: &SqlitePool, id: &str, email: &str) -> Result<User> {
    sqlx::query(
        r#"
        INSERT INTO users (id, email, admin, created_at)
        VALUES (?, ?, 0, ?)
        ON CONFLICT(id) DO UPDATE SET email = excluded.email
        "#,
    )
    .bind(id)
    .bind(email)
    .bind(super::now_rfc3339())
    .execute(pool)
    .await?;

    get_user(pool, id)
        .await?
        .ok_or_else(|| crate::Error::Internal(format!("upserted user {} not found", id)))
}

/// Load a user by identity provider subject id
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, admin, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|row| user_from_row(&row)))
}

pub(crate) fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        admin: row.get::<i64, _>("admin") != 0,
        created_at: row.get("created_at"),
    }
}
