//! Match result repository for SQLite operations
//!
//! Results are 1:1 with fixtures. All writes happen inside the result
//! recorder's transactions so the standings ledger never drifts.

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::ResultRow;

use super::edition::edition_exists;

fn map_result(
    (id, fixture_id, team1_score, team2_score, winner_id, summary, updated_at): (
        i64,
        i64,
        i64,
        i64,
        Option<i64>,
        Option<String>,
        i64,
    ),
) -> ResultRow {
    ResultRow {
        id,
        fixture_id,
        team1_score,
        team2_score,
        winner_id,
        summary,
        updated_at,
    }
}

/// Get the result recorded for a fixture, if any
pub async fn get_by_fixture(
    pool: &SqlitePool,
    fixture_id: i64,
) -> Result<Option<ResultRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, i64, i64, i64, Option<i64>, Option<String>, i64)>(
        "SELECT id, fixture_id, team1_score, team2_score, winner_id, summary, updated_at FROM results WHERE fixture_id = ?",
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_result))
}

/// List all results for an edition, in fixture kickoff order
pub async fn list_for_edition(
    pool: &SqlitePool,
    edition_id: i64,
) -> Result<Vec<ResultRow>, SqliteError> {
    if !edition_exists(pool, edition_id).await? {
        return Err(SqliteError::not_found("edition", edition_id));
    }

    let rows = sqlx::query_as::<_, (i64, i64, i64, i64, Option<i64>, Option<String>, i64)>(
        r#"
        SELECT r.id, r.fixture_id, r.team1_score, r.team2_score, r.winner_id, r.summary, r.updated_at
        FROM results r
        JOIN fixtures f ON r.fixture_id = f.id
        WHERE f.edition_id = ?
        ORDER BY f.match_at ASC, f.match_number ASC
        "#,
    )
    .bind(edition_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_result).collect())
}

/// Insert a result row inside a recorder transaction
pub async fn insert(
    conn: &mut SqliteConnection,
    fixture_id: i64,
    team1_score: i64,
    team2_score: i64,
    winner_id: Option<i64>,
    summary: Option<&str>,
) -> Result<i64, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        "INSERT INTO results (fixture_id, team1_score, team2_score, winner_id, summary, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(fixture_id)
    .bind(team1_score)
    .bind(team2_score)
    .bind(winner_id)
    .bind(summary)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Overwrite a result's scores inside a recorder transaction
pub async fn update(
    conn: &mut SqliteConnection,
    fixture_id: i64,
    team1_score: i64,
    team2_score: i64,
    winner_id: Option<i64>,
    summary: Option<&str>,
) -> Result<(), SqliteError> {
    let now = chrono::Utc::now().timestamp();
    sqlx::query(
        "UPDATE results SET team1_score = ?, team2_score = ?, winner_id = ?, summary = ?, updated_at = ? WHERE fixture_id = ?",
    )
    .bind(team1_score)
    .bind(team2_score)
    .bind(winner_id)
    .bind(summary)
    .bind(now)
    .bind(fixture_id)
    .execute(conn)
    .await?;
    Ok(())
}

/// Delete a result row inside a recorder transaction
pub async fn delete_by_fixture(
    conn: &mut SqliteConnection,
    fixture_id: i64,
) -> Result<(), SqliteError> {
    sqlx::query("DELETE FROM results WHERE fixture_id = ?")
        .bind(fixture_id)
        .execute(conn)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{edition, fixture, team};
    use crate::data::types::Slot;

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn seed_fixture(pool: &SqlitePool) -> (i64, i64) {
        let ed = edition::create_edition(pool, "2025").await.unwrap();
        let t1 = team::create_team(pool, "Aces", "ACE", None, "Men")
            .await
            .unwrap();
        let t2 = team::create_team(pool, "Bears", "BEA", None, "Men")
            .await
            .unwrap();
        let fx = fixture::create_fixture(
            pool,
            fixture::NewFixture {
                edition_id: ed.id,
                match_at: 1_750_000_000,
                label: "Match 1".to_string(),
                category: "Men".to_string(),
                match_number: 1,
                pool_id: None,
                team1: Slot::Team(t1.id),
                team2: Slot::Team(t2.id),
                slot1: None,
                slot2: None,
            },
        )
        .await
        .unwrap();
        (ed.id, fx.id)
    }

    #[tokio::test]
    async fn test_insert_and_get_result() {
        let pool = setup_test_pool().await;
        let (_, fixture_id) = seed_fixture(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, fixture_id, 3, 1, Some(1), Some("comfortable win"))
            .await
            .unwrap();
        drop(conn);

        let result = get_by_fixture(&pool, fixture_id).await.unwrap().unwrap();
        assert_eq!(result.team1_score, 3);
        assert_eq!(result.team2_score, 1);
        assert_eq!(result.summary.as_deref(), Some("comfortable win"));
    }

    #[tokio::test]
    async fn test_one_result_per_fixture() {
        let pool = setup_test_pool().await;
        let (_, fixture_id) = seed_fixture(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, fixture_id, 1, 0, Some(1), None)
            .await
            .unwrap();
        let err = insert(&mut conn, fixture_id, 2, 0, Some(1), None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Database(_)));
    }

    #[tokio::test]
    async fn test_list_for_edition() {
        let pool = setup_test_pool().await;
        let (edition_id, fixture_id) = seed_fixture(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, fixture_id, 2, 2, None, None).await.unwrap();
        drop(conn);

        let results = list_for_edition(&pool, edition_id).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].winner_id, None);
    }

    #[tokio::test]
    async fn test_list_for_edition_unknown_edition() {
        let pool = setup_test_pool().await;
        let err = list_for_edition(&pool, 404).await.unwrap_err();
        assert!(matches!(err, SqliteError::NotFound { entity: "edition", .. }));
    }

    #[tokio::test]
    async fn test_delete_by_fixture() {
        let pool = setup_test_pool().await;
        let (_, fixture_id) = seed_fixture(&pool).await;

        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, fixture_id, 1, 0, Some(1), None)
            .await
            .unwrap();
        delete_by_fixture(&mut conn, fixture_id).await.unwrap();
        drop(conn);

        assert!(get_by_fixture(&pool, fixture_id).await.unwrap().is_none());
    }
}
