//! Recording database operations

use sqlx::{Row, SqlitePool};

use crate::db::models::{Recording, RecordingOverview};
use crate::Result;

const RECORDING_COLUMNS: &str = "id, model, path, url, score, created_at";

/// Load one recording by id
pub async fn get(pool: &SqlitePool, id: i64) -> Result<Option<Recording>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM recordings WHERE id = ?",
        RECORDING_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| recording_from_row(&row)))
}

/// Pick a uniformly random recording for a model
pub async fn get_random_for_model(pool: &SqlitePool, model: &str) -> Result<Option<Recording>> {
    let row = sqlx::query(&format!(
        "SELECT {} FROM recordings WHERE model = ? ORDER BY RANDOM() LIMIT 1",
        RECORDING_COLUMNS
    ))
    .bind(model)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| recording_from_row(&row)))
}

/// Count recordings for a model
pub async fn count_for_model(pool: &SqlitePool, model: &str) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM recordings WHERE model = ?")
        .bind(model)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

/// Page through a model's recordings, newest first, with submission counts
pub async fn list_for_model(
    pool: &SqlitePool,
    model: &str,
    limit: i64,
    offset: i64,
) -> Result<Vec<RecordingOverview>> {
    let rows = sqlx::query(
        r#"
        SELECT r.id, r.model, r.url, r.score, r.created_at,
               (SELECT COUNT(*) FROM transcriptions t WHERE t.recording_id = r.id)
                   AS transcription_count
        FROM recordings r
        WHERE r.model = ?
        ORDER BY r.id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(model)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| RecordingOverview {
            id: row.get("id"),
            model: row.get("model"),
            url: row.get("url"),
            score: row.get("score"),
            created_at: row.get("created_at"),
            transcription_count: row.get("transcription_count"),
        })
        .collect())
}

/// Register a new sample recording for a model
pub async fn add(pool: &SqlitePool, model: &str, path: &str, url: &str) -> Result<Recording> {
    let result = sqlx::query(
        "INSERT INTO recordings (model, path, url, score, created_at) VALUES (?, ?, ?, 0, ?)",
    )
    .bind(model)
    .bind(path)
    .bind(url)
    .bind(super::now_rfc3339())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get(pool, id)
        .await?
        .ok_or_else(|| crate::Error::Internal(format!("inserted recording {} not found", id)))
}

fn recording_from_row(row: &sqlx::sqlite::SqliteRow) -> Recording {
    Recording {
        id: row.get("id"),
        model: row.get("model"),
        path: row.get("path"),
        url: row.get("url"),
        score: row.get("score"),
        created_at: row.get("created_at"),
    }
}
