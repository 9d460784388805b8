//! Standings repository for SQLite operations
//!
//! Standings are derived state. Rows are only ever touched by applying
//! a signed delta; recording a result applies the delta, retracting it
//! applies the negation. Deltas arrive through the result recorder's
//! transactions.

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::StandingRow;
use crate::domain::scoring::{ScoringRule, StandingDelta};

use super::edition::edition_exists;

/// Apply a signed standings delta for one team inside a recorder
/// transaction. Creates the row on first contact.
pub async fn apply_delta(
    conn: &mut SqliteConnection,
    edition_id: i64,
    pool_id: i64,
    category: &str,
    team_id: i64,
    delta: &StandingDelta,
    rule: &ScoringRule,
) -> Result<(), SqliteError> {
    let points = delta.points(rule);
    sqlx::query(
        r#"
        INSERT INTO standings (edition_id, pool_id, category, team_id, played, won, drawn, lost, goals_for, goals_against, goal_diff, points, pool_winner)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
        ON CONFLICT(edition_id, pool_id, category, team_id) DO UPDATE SET
            played = played + excluded.played,
            won = won + excluded.won,
            drawn = drawn + excluded.drawn,
            lost = lost + excluded.lost,
            goals_for = goals_for + excluded.goals_for,
            goals_against = goals_against + excluded.goals_against,
            goal_diff = goal_diff + excluded.goal_diff,
            points = points + excluded.points
        "#,
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(category)
    .bind(team_id)
    .bind(delta.played)
    .bind(delta.won)
    .bind(delta.drawn)
    .bind(delta.lost)
    .bind(delta.goals_for)
    .bind(delta.goals_against)
    .bind(delta.goals_for - delta.goals_against)
    .bind(points)
    .execute(conn)
    .await?;
    Ok(())
}

/// Get the standings table for an edition
///
/// Pool and category filters are optional; unfiltered rows come back
/// grouped by pool then category. Tie-break order within a group:
/// points, then goal difference, then goals scored, then team name.
/// The team join is an inner join; a standings row without its team is
/// a broken store and surfaces as an error.
pub async fn get_standings(
    pool: &SqlitePool,
    edition_id: i64,
    pool_id: Option<i64>,
    category: Option<&str>,
) -> Result<Vec<StandingRow>, SqliteError> {
    if !edition_exists(pool, edition_id).await? {
        return Err(SqliteError::not_found("edition", edition_id));
    }

    let rows = sqlx::query_as::<_, (i64, i64, i64, String, i64, String, i64, i64, i64, i64, i64, i64, i64, i64, i64)>(
        r#"
        SELECT s.id, s.edition_id, s.pool_id, s.category, s.team_id, t.name,
               s.played, s.won, s.drawn, s.lost, s.goals_for, s.goals_against,
               s.goal_diff, s.points, s.pool_winner
        FROM standings s
        JOIN teams t ON s.team_id = t.id
        WHERE s.edition_id = ?
          AND (? IS NULL OR s.pool_id = ?)
          AND (? IS NULL OR s.category = ?)
        ORDER BY s.pool_id ASC, s.category ASC,
                 s.points DESC, s.goal_diff DESC, s.goals_for DESC, t.name ASC
        "#,
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(pool_id)
    .bind(category)
    .bind(category)
    .fetch_all(pool)
    .await?;

    let expected: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM standings WHERE edition_id = ? AND (? IS NULL OR pool_id = ?) AND (? IS NULL OR category = ?)",
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(pool_id)
    .bind(category)
    .bind(category)
    .fetch_one(pool)
    .await?;

    if rows.len() as i64 != expected {
        return Err(SqliteError::conflict(format!(
            "standings for edition {} reference missing teams",
            edition_id
        )));
    }

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                edition_id,
                pool_id,
                category,
                team_id,
                team_name,
                played,
                won,
                drawn,
                lost,
                goals_for,
                goals_against,
                goal_diff,
                points,
                pool_winner,
            )| StandingRow {
                id,
                edition_id,
                pool_id,
                category,
                team_id,
                team_name,
                played,
                won,
                drawn,
                lost,
                goals_for,
                goals_against,
                goal_diff,
                points,
                pool_winner: pool_winner != 0,
            },
        )
        .collect())
}

/// Flag the pool winner, clearing any previous flag in the same scope
///
/// The winner is the top standings row under the tie-break order.
/// `team_id` overrides that pick for dead heats the table cannot
/// resolve; the named team must still have a row in the scope. Returns
/// the flagged team.
pub async fn mark_pool_winner(
    pool: &SqlitePool,
    edition_id: i64,
    pool_id: i64,
    category: &str,
    team_id: Option<i64>,
) -> Result<i64, SqliteError> {
    let mut tx = pool.begin().await?;

    let winner = match team_id {
        Some(id) => id,
        None => sqlx::query_scalar::<_, i64>(
            r#"
            SELECT s.team_id
            FROM standings s
            JOIN teams t ON s.team_id = t.id
            WHERE s.edition_id = ? AND s.pool_id = ? AND s.category = ?
            ORDER BY s.points DESC, s.goal_diff DESC, s.goals_for DESC, t.name ASC
            LIMIT 1
            "#,
        )
        .bind(edition_id)
        .bind(pool_id)
        .bind(category)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(SqliteError::not_found("standings for pool", pool_id))?,
    };

    sqlx::query(
        "UPDATE standings SET pool_winner = 0 WHERE edition_id = ? AND pool_id = ? AND category = ?",
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(category)
    .execute(&mut *tx)
    .await?;

    let result = sqlx::query(
        "UPDATE standings SET pool_winner = 1 WHERE edition_id = ? AND pool_id = ? AND category = ? AND team_id = ?",
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(category)
    .bind(winner)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(SqliteError::not_found("standing", winner));
    }

    tx.commit().await?;
    Ok(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::repositories::{edition, pool as pool_repo, team};

    async fn setup_test_pool() -> SqlitePool {
        let pool = SqlitePool::connect(":memory:").await.unwrap();
        sqlx::query(crate::data::sqlite::schema::SCHEMA)
            .execute(&pool)
            .await
            .unwrap();
        pool
    }

    async fn seed(pool: &SqlitePool) -> (i64, i64, i64, i64) {
        let ed = edition::create_edition(pool, "2025").await.unwrap();
        let group = pool_repo::create_pool(pool, "Pool A", "Men").await.unwrap();
        let t1 = team::create_team(pool, "Aces", "ACE", None, "Men")
            .await
            .unwrap();
        let t2 = team::create_team(pool, "Bears", "BEA", None, "Men")
            .await
            .unwrap();
        (ed.id, group.id, t1.id, t2.id)
    }

    fn win_delta(gf: i64, ga: i64) -> StandingDelta {
        StandingDelta {
            played: 1,
            won: 1,
            drawn: 0,
            lost: 0,
            goals_for: gf,
            goals_against: ga,
        }
    }

    #[tokio::test]
    async fn test_apply_delta_creates_and_accumulates() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, _) = seed(&pool).await;
        let rule = ScoringRule::default();

        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(3, 1), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        drop(conn);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        assert_eq!(table.len(), 1);
        let row = &table[0];
        assert_eq!(row.played, 2);
        assert_eq!(row.won, 2);
        assert_eq!(row.goals_for, 5);
        assert_eq!(row.goals_against, 1);
        assert_eq!(row.goal_diff, 4);
        assert_eq!(row.points, 4);
    }

    #[tokio::test]
    async fn test_negated_delta_restores_prior_state() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, _) = seed(&pool).await;
        let rule = ScoringRule::default();
        let delta = win_delta(3, 1);

        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &delta, &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &delta.neg(), &rule)
            .await
            .unwrap();
        drop(conn);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        let row = &table[0];
        assert_eq!(row.played, 0);
        assert_eq!(row.points, 0);
        assert_eq!(row.goal_diff, 0);
    }

    #[tokio::test]
    async fn test_standings_tie_break_order() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, t2) = seed(&pool).await;
        let rule = ScoringRule::default();

        // Both on one win; Bears have the better goal difference
        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(2, 1), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t2, &win_delta(4, 0), &rule)
            .await
            .unwrap();
        drop(conn);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        assert_eq!(table[0].team_id, t2);
        assert_eq!(table[1].team_id, t1);
    }

    #[tokio::test]
    async fn test_equal_records_order_by_name() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, t2) = seed(&pool).await;
        let rule = ScoringRule::default();

        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t2, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        drop(conn);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        // Aces before Bears
        assert_eq!(table[0].team_id, t1);
    }

    #[tokio::test]
    async fn test_unfiltered_standings_cover_all_pools() {
        let pool = setup_test_pool().await;
        let (ed, group_a, t1, t2) = seed(&pool).await;
        let group_b = pool_repo::create_pool(&pool, "Pool B", "Men").await.unwrap();
        let rule = ScoringRule::default();

        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group_a, "Men", t1, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group_b.id, "Men", t2, &win_delta(3, 1), &rule)
            .await
            .unwrap();
        drop(conn);

        let table = get_standings(&pool, ed, None, None).await.unwrap();
        assert_eq!(table.len(), 2);
        // Grouped by pool
        assert_eq!(table[0].pool_id, group_a);
        assert_eq!(table[1].pool_id, group_b.id);

        let only_b = get_standings(&pool, ed, Some(group_b.id), None)
            .await
            .unwrap();
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b[0].team_id, t2);
    }

    #[tokio::test]
    async fn test_mark_pool_winner_picks_table_leader() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, t2) = seed(&pool).await;
        let rule = ScoringRule::default();

        // Bears lead on goal difference
        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(2, 1), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t2, &win_delta(4, 0), &rule)
            .await
            .unwrap();
        drop(conn);

        let flagged = mark_pool_winner(&pool, ed, group, "Men", None).await.unwrap();
        assert_eq!(flagged, t2);

        // Another Aces win takes the lead; re-marking moves the flag
        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(3, 0), &rule)
            .await
            .unwrap();
        drop(conn);
        let flagged = mark_pool_winner(&pool, ed, group, "Men", None).await.unwrap();
        assert_eq!(flagged, t1);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        let winners: Vec<i64> = table
            .iter()
            .filter(|s| s.pool_winner)
            .map(|s| s.team_id)
            .collect();
        assert_eq!(winners, vec![t1]);
    }

    #[tokio::test]
    async fn test_mark_pool_winner_explicit_override_for_dead_heat() {
        let pool = setup_test_pool().await;
        let (ed, group, t1, t2) = seed(&pool).await;
        let rule = ScoringRule::default();

        // Identical records; the name tie-break alone would pick Aces
        let mut conn = pool.acquire().await.unwrap();
        apply_delta(&mut conn, ed, group, "Men", t1, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        apply_delta(&mut conn, ed, group, "Men", t2, &win_delta(2, 0), &rule)
            .await
            .unwrap();
        drop(conn);

        let flagged = mark_pool_winner(&pool, ed, group, "Men", Some(t2))
            .await
            .unwrap();
        assert_eq!(flagged, t2);

        let table = get_standings(&pool, ed, Some(group), Some("Men")).await.unwrap();
        let winner = table.iter().find(|s| s.pool_winner).unwrap();
        assert_eq!(winner.team_id, t2);
    }

    #[tokio::test]
    async fn test_mark_pool_winner_unknown_team() {
        let pool = setup_test_pool().await;
        let (ed, group, _, _) = seed(&pool).await;

        // No standings rows at all
        let err = mark_pool_winner(&pool, ed, group, "Men", None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::NotFound { .. }));

        let err = mark_pool_winner(&pool, ed, group, "Men", Some(999))
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::NotFound { .. }));
    }
}
