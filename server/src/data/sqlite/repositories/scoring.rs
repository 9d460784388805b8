//! Per-player match scoring detail repository
//!
//! An append-only side log (goals, cards, fouls) per player per
//! fixture. It never feeds standings; those are driven solely by the
//! recorded team scores.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::ScoringDetailRow;

/// Player statistics captured for one fixture
#[derive(Debug, Clone, Default)]
pub struct NewScoringDetail {
    pub goals: i64,
    pub green_cards: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub fouls: i64,
}

/// Append a scoring detail line for a player
pub async fn add_detail(
    pool: &SqlitePool,
    fixture_id: i64,
    team_id: i64,
    player_id: i64,
    detail: NewScoringDetail,
) -> Result<ScoringDetailRow, SqliteError> {
    let fixture_ok: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM fixtures WHERE id = ?")
        .bind(fixture_id)
        .fetch_one(pool)
        .await?;
    if !fixture_ok {
        return Err(SqliteError::not_found("fixture", fixture_id));
    }

    // Player must belong to the team they are credited under
    let player_team: Option<i64> = sqlx::query_scalar("SELECT team_id FROM players WHERE id = ?")
        .bind(player_id)
        .fetch_optional(pool)
        .await?;
    match player_team {
        None => return Err(SqliteError::not_found("player", player_id)),
        Some(actual) if actual != team_id => {
            return Err(SqliteError::validation(format!(
                "player {} does not play for team {}",
                player_id, team_id
            )));
        }
        Some(_) => {}
    }

    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        r#"
        INSERT INTO scoring_details (fixture_id, team_id, player_id, goals, green_cards, yellow_cards, red_cards, fouls, created_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(fixture_id)
    .bind(team_id)
    .bind(player_id)
    .bind(detail.goals)
    .bind(detail.green_cards)
    .bind(detail.yellow_cards)
    .bind(detail.red_cards)
    .bind(detail.fouls)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(ScoringDetailRow {
        id: result.last_insert_rowid(),
        fixture_id,
        team_id,
        player_id,
        goals: detail.goals,
        green_cards: detail.green_cards,
        yellow_cards: detail.yellow_cards,
        red_cards: detail.red_cards,
        fouls: detail.fouls,
        created_at: now,
    })
}

/// List scoring detail lines for a fixture
pub async fn list_for_fixture(
    pool: &SqlitePool,
    fixture_id: i64,
) -> Result<Vec<ScoringDetailRow>, SqliteError> {
    let fixture_ok: bool = sqlx::query_scalar("SELECT COUNT(*) > 0 FROM fixtures WHERE id = ?")
        .bind(fixture_id)
        .fetch_one(pool)
        .await?;
    if !fixture_ok {
        return Err(SqliteError::not_found("fixture", fixture_id));
    }

    let rows = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64, i64, i64, i64, i64)>(
        r#"
        SELECT id, fixture_id, team_id, player_id, goals, green_cards, yellow_cards, red_cards, fouls, created_at
        FROM scoring_details
        WHERE fixture_id = ?
        ORDER BY team_id ASC, player_id ASC
        "#,
    )
    .bind(fixture_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(
                id,
                fixture_id,
                team_id,
                player_id,
                goals,
                green_cards,
                yellow_cards,
                red_cards,
                fouls,
                created_at,
            )| ScoringDetailRow {
                id,
                fixture_id,
                team_id,
                player_id,
                goals,
                green_cards,
                yellow_cards,
                red_cards,
                fouls,
                created_at,
            },
        )
        .collect())
}
