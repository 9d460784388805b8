//! Edition (tournament year) repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::EditionRow;

/// Create a new edition. The year label must be unique.
pub async fn create_edition(pool: &SqlitePool, year: &str) -> Result<EditionRow, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM editions WHERE year = ?")
        .bind(year)
        .fetch_one(pool)
        .await?;
    if exists {
        return Err(SqliteError::conflict(format!(
            "edition {} already exists",
            year
        )));
    }

    let result = sqlx::query("INSERT INTO editions (year, status) VALUES (?, 1)")
        .bind(year)
        .execute(pool)
        .await?;

    Ok(EditionRow {
        id: result.last_insert_rowid(),
        year: year.to_string(),
        active: true,
    })
}

/// Get an edition by ID
pub async fn get_edition(pool: &SqlitePool, id: i64) -> Result<Option<EditionRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String, i64)>(
        "SELECT id, year, status FROM editions WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(id, year, status)| EditionRow {
        id,
        year,
        active: status != 0,
    }))
}

/// List editions, most recent year first, optionally only active ones
pub async fn list_editions(
    pool: &SqlitePool,
    active_only: bool,
) -> Result<Vec<EditionRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String, i64)>(
        "SELECT id, year, status FROM editions WHERE (? = 0 OR status = 1) ORDER BY year DESC",
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, year, status)| EditionRow {
            id,
            year,
            active: status != 0,
        })
        .collect())
}

/// Check whether an edition exists
pub async fn edition_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM editions WHERE id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_edition() {
        let pool = setup_test_pool().await;
        let edition = create_edition(&pool, "2025").await.unwrap();
        assert!(edition.id > 0);
        assert_eq!(edition.year, "2025");
        assert!(edition.active);
    }

    #[tokio::test]
    async fn test_create_edition_duplicate_year() {
        let pool = setup_test_pool().await;
        create_edition(&pool, "2025").await.unwrap();
        let err = create_edition(&pool, "2025").await.unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_editions_newest_first() {
        let pool = setup_test_pool().await;
        create_edition(&pool, "2023").await.unwrap();
        create_edition(&pool, "2025").await.unwrap();
        create_edition(&pool, "2024").await.unwrap();

        let editions = list_editions(&pool, false).await.unwrap();
        let years: Vec<&str> = editions.iter().map(|e| e.year.as_str()).collect();
        assert_eq!(years, vec!["2025", "2024", "2023"]);
    }

    #[tokio::test]
    async fn test_list_editions_active_only() {
        let pool = setup_test_pool().await;
        create_edition(&pool, "2024").await.unwrap();
        create_edition(&pool, "2025").await.unwrap();
        sqlx::query("UPDATE editions SET status = 0 WHERE year = '2024'")
            .execute(&pool)
            .await
            .unwrap();

        let active = list_editions(&pool, true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].year, "2025");

        let all = list_editions(&pool, false).await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(!all[1].active);
    }

    #[tokio::test]
    async fn test_edition_exists() {
        let pool = setup_test_pool().await;
        let edition = create_edition(&pool, "2025").await.unwrap();
        assert!(edition_exists(&pool, edition.id).await.unwrap());
        assert!(!edition_exists(&pool, 999).await.unwrap());
    }
}
