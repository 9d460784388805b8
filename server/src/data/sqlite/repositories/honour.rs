//! Honours board repository for SQLite operations
//!
//! Honours record historical champions per year and category. They are
//! entered directly and never derived from fixtures, so seasons that
//! predate the live results ledger can be represented.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::HonourRow;

use super::pool::category_exists;
use super::team::team_exists;

/// Record a champion (or joint champions) for a year and category
pub async fn record_honour(
    pool: &SqlitePool,
    year: i64,
    category: &str,
    team1_id: i64,
    team2_id: Option<i64>,
) -> Result<HonourRow, SqliteError> {
    if !category_exists(pool, category).await? {
        return Err(SqliteError::validation(format!(
            "unknown category: {}",
            category
        )));
    }
    if !team_exists(pool, team1_id).await? {
        return Err(SqliteError::not_found("team", team1_id));
    }
    if let Some(second) = team2_id {
        if second == team1_id {
            return Err(SqliteError::validation(
                "joint winners must be two distinct teams",
            ));
        }
        if !team_exists(pool, second).await? {
            return Err(SqliteError::not_found("team", second));
        }
    }

    let exists: bool =
        sqlx::query_scalar("SELECT COUNT(*) > 0 FROM honours WHERE year = ? AND category = ?")
            .bind(year)
            .bind(category)
            .fetch_one(pool)
            .await?;
    if exists {
        return Err(SqliteError::conflict(format!(
            "honour for {} {} already recorded",
            year, category
        )));
    }

    let joint = team2_id.is_some();
    let result = sqlx::query(
        "INSERT INTO honours (year, category, team1_id, team2_id, joint_winner) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(year)
    .bind(category)
    .bind(team1_id)
    .bind(team2_id)
    .bind(joint as i64)
    .execute(pool)
    .await?;

    Ok(HonourRow {
        id: result.last_insert_rowid(),
        year,
        category: category.to_string(),
        team1_id,
        team2_id,
        joint_winner: joint,
    })
}

/// List the full honours board, most recent year first
pub async fn list_honours(pool: &SqlitePool) -> Result<Vec<HonourRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, i64, String, i64, Option<i64>, i64)>(
        "SELECT id, year, category, team1_id, team2_id, joint_winner FROM honours ORDER BY year DESC, category ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_honour).collect())
}

/// List honours for a single year
///
/// A year nothing was recorded for is NotFound, not an empty board.
pub async fn list_for_year(pool: &SqlitePool, year: i64) -> Result<Vec<HonourRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, i64, String, i64, Option<i64>, i64)>(
        "SELECT id, year, category, team1_id, team2_id, joint_winner FROM honours WHERE year = ? ORDER BY category ASC",
    )
    .bind(year)
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        return Err(SqliteError::not_found("honours for year", year));
    }

    Ok(rows.into_iter().map(map_honour).collect())
}

fn map_honour(
    (id, year, category, team1_id, team2_id, joint_winner): (
        i64,
        i64,
        String,
        i64,
        Option<i64>,
        i64,
    ),
) -> HonourRow {
    HonourRow {
        id,
        year,
        category,
        team1_id,
        team2_id,
        joint_winner: joint_winner != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::team;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn seed_teams(pool: &SqlitePool) -> (i64, i64) {
        let t1 = team::create_team(pool, "Aces", "ACE", None, "Men")
            .await
            .unwrap();
        let t2 = team::create_team(pool, "Bears", "BEA", None, "Men")
            .await
            .unwrap();
        (t1.id, t2.id)
    }

    #[tokio::test]
    async fn test_record_single_winner() {
        let pool = setup_test_pool().await;
        let (t1, _) = seed_teams(&pool).await;

        let honour = record_honour(&pool, 2024, "Men", t1, None).await.unwrap();
        assert!(!honour.joint_winner);
        assert_eq!(honour.team2_id, None);
    }

    #[tokio::test]
    async fn test_record_joint_winners() {
        let pool = setup_test_pool().await;
        let (t1, t2) = seed_teams(&pool).await;

        let honour = record_honour(&pool, 2024, "Men", t1, Some(t2))
            .await
            .unwrap();
        assert!(honour.joint_winner);
        assert_eq!(honour.team2_id, Some(t2));
    }

    #[tokio::test]
    async fn test_joint_winner_must_differ() {
        let pool = setup_test_pool().await;
        let (t1, _) = seed_teams(&pool).await;

        let err = record_honour(&pool, 2024, "Men", t1, Some(t1))
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Validation(_)));
    }

    #[tokio::test]
    async fn test_duplicate_year_category_rejected() {
        let pool = setup_test_pool().await;
        let (t1, t2) = seed_teams(&pool).await;

        record_honour(&pool, 2024, "Men", t1, None).await.unwrap();
        let err = record_honour(&pool, 2024, "Men", t2, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));

        // Same year, other category is fine
        record_honour(&pool, 2024, "Women", t1, None).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_honours_recent_first() {
        let pool = setup_test_pool().await;
        let (t1, t2) = seed_teams(&pool).await;

        record_honour(&pool, 2022, "Men", t1, None).await.unwrap();
        record_honour(&pool, 2024, "Men", t2, None).await.unwrap();
        record_honour(&pool, 2023, "Men", t1, None).await.unwrap();

        let honours = list_honours(&pool).await.unwrap();
        let years: Vec<i64> = honours.iter().map(|h| h.year).collect();
        assert_eq!(years, vec![2024, 2023, 2022]);
    }

    #[tokio::test]
    async fn test_list_for_year() {
        let pool = setup_test_pool().await;
        let (t1, t2) = seed_teams(&pool).await;

        record_honour(&pool, 2024, "Men", t1, None).await.unwrap();
        record_honour(&pool, 2024, "Women", t2, None).await.unwrap();
        record_honour(&pool, 2023, "Men", t2, None).await.unwrap();

        let honours = list_for_year(&pool, 2024).await.unwrap();
        assert_eq!(honours.len(), 2);
        assert_eq!(honours[0].category, "Men");
    }

    #[tokio::test]
    async fn test_list_for_empty_year_is_not_found() {
        let pool = setup_test_pool().await;
        let (t1, _) = seed_teams(&pool).await;
        record_honour(&pool, 2024, "Men", t1, None).await.unwrap();

        let err = list_for_year(&pool, 1999).await.unwrap_err();
        assert!(matches!(err, SqliteError::NotFound { id: 1999, .. }));
    }
}
