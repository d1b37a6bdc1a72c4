//! Worker type database operations
//!
//! Worker types describe the speech recognition models offered for demo and
//! transcription. The availability flag is maintained by the platform side;
//! the admin edit form only touches name and description.

use sqlx::{Row, SqlitePool};

use crate::db::models::WorkerType;
use crate::Result;

/// List all worker types, ordered by model id
pub async fn list(pool: &SqlitePool) -> Result<Vec<WorkerType>> {
    let rows = sqlx::query(
        "SELECT id, name, description, available FROM worker_types ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(worker_type_from_row).collect())
}

/// List only the worker types currently marked available
pub async fn available_workers(pool: &SqlitePool) -> Result<Vec<WorkerType>> {
    let rows = sqlx::query(
        "SELECT id, name, description, available FROM worker_types WHERE available = 1 ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(worker_type_from_row).collect())
}

/// Load one worker type by model id
pub async fn get(pool: &SqlitePool, id: &str) -> Result<Option<WorkerType>> {
    let row = sqlx::query(
        "SELECT id, name, description, available FROM worker_types WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| worker_type_from_row(&row)))
}

/// Insert or update a worker type's display name and description
///
/// Preserves the availability flag on existing rows; new rows start
/// unavailable until the platform marks them otherwise.
pub async fn save(pool: &SqlitePool, id: &str, name: &str, description: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(crate::Error::InvalidInput(
            "worker type id must not be empty".to_string(),
        ));
    }

    sqlx::query(
        r#"
        INSERT INTO worker_types (id, name, description, available)
        VALUES (?, ?, ?, 0)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            description = excluded.description
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flip the availability flag for a worker type
pub async fn set_available(pool: &SqlitePool, id: &str, available: bool) -> Result<()> {
    let result = sqlx::query("UPDATE worker_types SET available = ? WHERE id = ?")
        .bind(available as i64)
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(crate::Error::NotFound(format!("worker type {}", id)));
    }

    Ok(())
}

fn worker_type_from_row(row: &sqlx::sqlite::SqliteRow) -> WorkerType {
    WorkerType {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        available: row.get::<i64, _>("available") != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::memory_pool;

    #[tokio::test]
    async fn test_save_then_edit_preserves_availability() {
        let pool = memory_pool().await;

        save(&pool, "en-GB", "English (GB)", "British English model")
            .await
            .expect("insert");
        set_available(&pool, "en-GB", true).await.expect("flag");

        save(&pool, "en-GB", "English (UK)", "Updated description")
            .await
            .expect("update");

        let worker = get(&pool, "en-GB").await.expect("query").expect("exists");
        assert_eq!(worker.name.as_deref(), Some("English (UK)"));
        assert_eq!(worker.description.as_deref(), Some("Updated description"));
        assert!(worker.available, "edit must not reset availability");
    }

    #[tokio::test]
    async fn test_available_workers_filters() {
        let pool = memory_pool().await;

        save(&pool, "en-GB", "English", "").await.expect("insert");
        save(&pool, "cs", "Czech", "").await.expect("insert");
        set_available(&pool, "cs", true).await.expect("flag");

        let available = available_workers(&pool).await.expect("query");
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].id, "cs");

        let all = list(&pool).await.expect("query");
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_save_rejects_empty_id() {
        let pool = memory_pool().await;
        let err = save(&pool, "  ", "Name", "Desc").await.unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_set_available_missing_worker() {
        let pool = memory_pool().await;
        let err = set_available(&pool, "nope", true).await.unwrap_err();
        assert!(matches!(err, crate::Error::NotFound(_)));
    }
}
