//! Fixture repository for SQLite operations
//!
//! Unresolved bracket slots are stored as NULL and decoded into
//! `Slot::Unresolved`. Outcome columns (winner_id, completed) are only
//! ever written through the result recorder's transactions.

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::sqlite::SqliteError;
use crate::data::types::{FixtureRow, Slot};

use super::edition::edition_exists;
use super::pool::{category_exists, pool_exists};
use super::team::team_exists;

/// Fields accepted when scheduling a fixture
#[derive(Debug, Clone)]
pub struct NewFixture {
    pub edition_id: i64,
    pub match_at: i64,
    pub label: String,
    pub category: String,
    pub match_number: i64,
    pub pool_id: Option<i64>,
    pub team1: Slot,
    pub team2: Slot,
    pub slot1: Option<i64>,
    pub slot2: Option<i64>,
}

/// Partial update for a scheduled fixture. `None` leaves a field alone.
/// `report_file` is double-wrapped so `Some(None)` clears it back to
/// NULL.
#[derive(Debug, Clone, Default)]
pub struct FixturePatch {
    pub match_at: Option<i64>,
    pub label: Option<String>,
    pub match_number: Option<i64>,
    pub team1: Option<Slot>,
    pub team2: Option<Slot>,
    pub report_file: Option<Option<String>>,
}

const FIXTURE_COLUMNS: &str = "id, edition_id, match_at, label, category, match_number, pool_id, team1_id, team2_id, slot1, slot2, winner_id, completed, report_file";

type FixtureTuple = (
    i64,
    i64,
    i64,
    String,
    String,
    i64,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    Option<i64>,
    i64,
    Option<String>,
);

fn map_fixture(row: FixtureTuple) -> FixtureRow {
    let (
        id,
        edition_id,
        match_at,
        label,
        category,
        match_number,
        pool_id,
        team1_id,
        team2_id,
        slot1,
        slot2,
        winner_id,
        completed,
        report_file,
    ) = row;
    FixtureRow {
        id,
        edition_id,
        match_at,
        label,
        category,
        match_number,
        pool_id,
        team1: Slot::from_db(team1_id),
        team2: Slot::from_db(team2_id),
        slot1,
        slot2,
        winner_id,
        completed: completed != 0,
        report_file,
    }
}

async fn validate_participants(
    pool: &SqlitePool,
    team1: Slot,
    team2: Slot,
) -> Result<(), SqliteError> {
    if let (Slot::Team(a), Slot::Team(b)) = (team1, team2)
        && a == b
    {
        return Err(SqliteError::validation(format!(
            "a fixture needs two distinct teams, got team {} twice",
            a
        )));
    }
    for slot in [team1, team2] {
        if let Slot::Team(id) = slot
            && !team_exists(pool, id).await?
        {
            return Err(SqliteError::not_found("team", id));
        }
    }
    Ok(())
}

/// Schedule a new fixture
pub async fn create_fixture(
    pool: &SqlitePool,
    fixture: NewFixture,
) -> Result<FixtureRow, SqliteError> {
    if !edition_exists(pool, fixture.edition_id).await? {
        return Err(SqliteError::not_found("edition", fixture.edition_id));
    }
    if !category_exists(pool, &fixture.category).await? {
        return Err(SqliteError::validation(format!(
            "unknown category: {}",
            fixture.category
        )));
    }
    if let Some(pool_id) = fixture.pool_id
        && !pool_exists(pool, pool_id).await?
    {
        return Err(SqliteError::not_found("pool", pool_id));
    }
    validate_participants(pool, fixture.team1, fixture.team2).await?;

    let result = sqlx::query(
        r#"
        INSERT INTO fixtures (edition_id, match_at, label, category, match_number, pool_id, team1_id, team2_id, slot1, slot2, completed)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0)
        "#,
    )
    .bind(fixture.edition_id)
    .bind(fixture.match_at)
    .bind(&fixture.label)
    .bind(&fixture.category)
    .bind(fixture.match_number)
    .bind(fixture.pool_id)
    .bind(fixture.team1.to_db())
    .bind(fixture.team2.to_db())
    .bind(fixture.slot1)
    .bind(fixture.slot2)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_fixture(pool, id)
        .await?
        .ok_or(SqliteError::not_found("fixture", id))
}

/// Get a fixture by ID
pub async fn get_fixture(pool: &SqlitePool, id: i64) -> Result<Option<FixtureRow>, SqliteError> {
    let row = sqlx::query_as::<_, FixtureTuple>(&format!(
        "SELECT {} FROM fixtures WHERE id = ?",
        FIXTURE_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_fixture))
}

/// List fixtures for an edition in kickoff order, optionally filtered
/// by category
pub async fn list_fixtures(
    pool: &SqlitePool,
    edition_id: i64,
    category: Option<&str>,
) -> Result<Vec<FixtureRow>, SqliteError> {
    if !edition_exists(pool, edition_id).await? {
        return Err(SqliteError::not_found("edition", edition_id));
    }

    let rows = match category {
        Some(cat) => {
            sqlx::query_as::<_, FixtureTuple>(&format!(
                "SELECT {} FROM fixtures WHERE edition_id = ? AND category = ? ORDER BY match_at ASC, match_number ASC",
                FIXTURE_COLUMNS
            ))
            .bind(edition_id)
            .bind(cat)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, FixtureTuple>(&format!(
                "SELECT {} FROM fixtures WHERE edition_id = ? ORDER BY match_at ASC, match_number ASC",
                FIXTURE_COLUMNS
            ))
            .bind(edition_id)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows.into_iter().map(map_fixture).collect())
}

/// Apply a partial update to a fixture
///
/// Participant slots on a completed fixture are frozen; changing them
/// would desync the standings derived from the recorded result.
pub async fn update_fixture(
    pool: &SqlitePool,
    id: i64,
    patch: FixturePatch,
) -> Result<FixtureRow, SqliteError> {
    let existing = get_fixture(pool, id)
        .await?
        .ok_or(SqliteError::not_found("fixture", id))?;

    let changes_teams = patch
        .team1
        .is_some_and(|t| t != existing.team1)
        || patch.team2.is_some_and(|t| t != existing.team2);
    if existing.completed && changes_teams {
        return Err(SqliteError::conflict(format!(
            "fixture {} is completed, participants can no longer change",
            id
        )));
    }

    let team1 = patch.team1.unwrap_or(existing.team1);
    let team2 = patch.team2.unwrap_or(existing.team2);
    validate_participants(pool, team1, team2).await?;

    sqlx::query(
        r#"
        UPDATE fixtures
        SET match_at = ?, label = ?, match_number = ?, team1_id = ?, team2_id = ?, report_file = ?
        WHERE id = ?
        "#,
    )
    .bind(patch.match_at.unwrap_or(existing.match_at))
    .bind(patch.label.as_deref().unwrap_or(&existing.label))
    .bind(patch.match_number.unwrap_or(existing.match_number))
    .bind(team1.to_db())
    .bind(team2.to_db())
    .bind(match &patch.report_file {
        Some(value) => value.as_deref(),
        None => existing.report_file.as_deref(),
    })
    .bind(id)
    .execute(pool)
    .await?;

    get_fixture(pool, id)
        .await?
        .ok_or(SqliteError::not_found("fixture", id))
}

/// Mark a fixture's outcome inside a recorder transaction
pub async fn set_outcome(
    conn: &mut SqliteConnection,
    id: i64,
    winner_id: Option<i64>,
    completed: bool,
) -> Result<(), SqliteError> {
    sqlx::query("UPDATE fixtures SET winner_id = ?, completed = ? WHERE id = ?")
        .bind(winner_id)
        .bind(completed as i64)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete a fixture row inside a recorder transaction
pub async fn delete_fixture_row(conn: &mut SqliteConnection, id: i64) -> Result<(), SqliteError> {
    sqlx::query("DELETE FROM fixtures WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}
