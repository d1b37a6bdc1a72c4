//! Transcription database operations
//!
//! Submissions are append-only; there is no update or delete path.

use sqlx::{Row, SqlitePool};

use crate::db::models::Transcription;
use crate::Result;

/// Flags a submitter can attach to a transcription
#[derive(Debug, Clone, Copy, Default)]
pub struct TranscriptionFlags {
    pub native_speaker: bool,
    pub offensive_language: bool,
    pub not_a_speech: bool,
}

/// Store one submission against a recording
///
/// `user_id` is None for anonymous submitters.
pub async fn add(
    pool: &SqlitePool,
    recording_id: i64,
    user_id: Option<&str>,
    text: &str,
    flags: TranscriptionFlags,
) -> Result<Transcription> {
    let result = sqlx::query(
        r#"
        INSERT INTO transcriptions
            (recording_id, user_id, text, native_speaker, offensive_language, not_a_speech, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(recording_id)
    .bind(user_id)
    .bind(text)
    .bind(flags.native_speaker as i64)
    .bind(flags.offensive_language as i64)
    .bind(flags.not_a_speech as i64)
    .bind(super::now_rfc3339())
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    let row = sqlx::query(
        "SELECT id, recording_id, user_id, text, native_speaker, offensive_language, not_a_speech, created_at
         FROM transcriptions WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;

    Ok(transcription_from_row(&row))
}

/// All submissions for a recording, newest first
pub async fn list_for_recording(pool: &SqlitePool, recording_id: i64) -> Result<Vec<Transcription>> {
    let rows = sqlx::query(
        "SELECT id, recording_id, user_id, text, native_speaker, offensive_language, not_a_speech, created_at
         FROM transcriptions WHERE recording_id = ? ORDER BY id DESC",
    )
    .bind(recording_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(transcription_from_row).collect())
}

/// Count submissions for a recording
pub async fn count_for_recording(pool: &SqlitePool, recording_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar("SELECT COUNT(*) FROM transcriptions WHERE recording_id = ?")
        .bind(recording_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

fn transcription_from_row(row: &sqlx::sqlite::SqliteRow) -> Transcription {
    Transcription {
        id: row.get("id"),
        recording_id: row.get("recording_id"),
        user_id: row.get("user_id"),
        text: row.get("text"),
        native_speaker: row.get::<i64, _>("native_speaker") != 0,
        offensive_language: row.get::<i64, _>("offensive_language") != 0,
        not_a_speech: row.get::<i64, _>("not_a_speech") != 0,
        created_at: row.get("created_at"),
    }
}
