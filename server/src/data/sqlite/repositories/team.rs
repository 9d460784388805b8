//! Team and roster repository for SQLite operations

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{PlayerRow, TeamRow};

/// Create a new team
pub async fn create_team(
    pool: &SqlitePool,
    name: &str,
    short_name: &str,
    logo: Option<&str>,
    category: &str,
) -> Result<TeamRow, SqliteError> {
    let now = chrono::Utc::now().timestamp();

    let result = sqlx::query(
        "INSERT INTO teams (name, short_name, logo, category, status, created_at, updated_at) VALUES (?, ?, ?, ?, 1, ?, ?)",
    )
    .bind(name)
    .bind(short_name)
    .bind(logo)
    .bind(category)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(TeamRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        short_name: short_name.to_string(),
        logo: logo.map(|s| s.to_string()),
        category: category.to_string(),
        active: true,
        created_at: now,
        updated_at: now,
    })
}

/// Get a team by ID
pub async fn get_team(pool: &SqlitePool, id: i64) -> Result<Option<TeamRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, String, String, Option<String>, String, i64, i64, i64)>(
        "SELECT id, name, short_name, logo, category, status, created_at, updated_at FROM teams WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_team))
}

/// List teams ordered by name, optionally only active ones or one
/// category
pub async fn list_teams(
    pool: &SqlitePool,
    active_only: bool,
    category: Option<&str>,
) -> Result<Vec<TeamRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String, String, Option<String>, String, i64, i64, i64)>(
        "SELECT id, name, short_name, logo, category, status, created_at, updated_at FROM teams WHERE (? = 0 OR status = 1) AND (? IS NULL OR category = ?) ORDER BY name ASC",
    )
    .bind(active_only)
    .bind(category)
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(map_team).collect())
}

/// Update a team's mutable fields. Returns the updated team if found.
pub async fn update_team(
    pool: &SqlitePool,
    id: i64,
    name: Option<&str>,
    short_name: Option<&str>,
    logo: Option<&str>,
    active: Option<bool>,
) -> Result<Option<TeamRow>, SqliteError> {
    let existing = match get_team(pool, id).await? {
        Some(team) => team,
        None => return Ok(None),
    };

    let now = chrono::Utc::now().timestamp();
    sqlx::query(
        "UPDATE teams SET name = ?, short_name = ?, logo = ?, status = ?, updated_at = ? WHERE id = ?",
    )
    .bind(name.unwrap_or(&existing.name))
    .bind(short_name.unwrap_or(&existing.short_name))
    .bind(logo.or(existing.logo.as_deref()))
    .bind(active.unwrap_or(existing.active) as i64)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    get_team(pool, id).await
}

/// Check whether a team exists and is active
pub async fn team_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool =
        sqlx::query_scalar("SELECT COUNT(*) > 0 FROM teams WHERE id = ? AND status = 1")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Add a player to a team's roster
pub async fn create_player(
    pool: &SqlitePool,
    team_id: i64,
    name: &str,
    position: Option<&str>,
    jersey_number: Option<i64>,
    photo: Option<&str>,
) -> Result<PlayerRow, SqliteError> {
    if !team_exists(pool, team_id).await? {
        return Err(SqliteError::not_found("team", team_id));
    }

    let result = sqlx::query(
        "INSERT INTO players (team_id, name, position, jersey_number, photo, status) VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(team_id)
    .bind(name)
    .bind(position)
    .bind(jersey_number)
    .bind(photo)
    .execute(pool)
    .await?;

    Ok(PlayerRow {
        id: result.last_insert_rowid(),
        team_id,
        name: name.to_string(),
        position: position.map(|s| s.to_string()),
        jersey_number,
        photo: photo.map(|s| s.to_string()),
        active: true,
    })
}

/// List a team's active roster, ordered by jersey number then name
pub async fn list_players(pool: &SqlitePool, team_id: i64) -> Result<Vec<PlayerRow>, SqliteError> {
    if !team_exists(pool, team_id).await? {
        return Err(SqliteError::not_found("team", team_id));
    }

    let rows = sqlx::query_as::<_, (i64, i64, String, Option<String>, Option<i64>, Option<String>, i64)>(
        "SELECT id, team_id, name, position, jersey_number, photo, status FROM players WHERE team_id = ? AND status = 1 ORDER BY jersey_number IS NULL, jersey_number ASC, name ASC",
    )
    .bind(team_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(
            |(id, team_id, name, position, jersey_number, photo, status)| PlayerRow {
                id,
                team_id,
                name,
                position,
                jersey_number,
                photo,
                active: status != 0,
            },
        )
        .collect())
}

fn map_team(
    (id, name, short_name, logo, category, status, created_at, updated_at): (
        i64,
        String,
        String,
        Option<String>,
        String,
        i64,
        i64,
        i64,
    ),
) -> TeamRow {
    TeamRow {
        id,
        name,
        short_name,
        logo,
        category,
        active: status != 0,
        created_at,
        updated_at,
    }
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
    async fn test_create_and_get_team() {
        let pool = setup_test_pool().await;
        let team = create_team(&pool, "Harlequins", "HAR", None, "Men")
            .await
            .unwrap();

        assert!(team.id > 0);
        assert!(team.active);

        let fetched = get_team(&pool, team.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Harlequins");
        assert_eq!(fetched.short_name, "HAR");
        assert_eq!(fetched.category, "Men");
    }

    #[tokio::test]
    async fn test_get_team_not_found() {
        let pool = setup_test_pool().await;
        assert!(get_team(&pool, 999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_teams_filters_and_orders() {
        let pool = setup_test_pool().await;
        create_team(&pool, "Zebras", "ZEB", None, "Men")
            .await
            .unwrap();
        create_team(&pool, "Aces", "ACE", None, "Men").await.unwrap();
        create_team(&pool, "Belles", "BEL", None, "Women")
            .await
            .unwrap();

        let men = list_teams(&pool, true, Some("Men")).await.unwrap();
        assert_eq!(men.len(), 2);
        assert_eq!(men[0].name, "Aces");
        assert_eq!(men[1].name, "Zebras");

        let all = list_teams(&pool, true, None).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_list_teams_active_only() {
        let pool = setup_test_pool().await;
        let team = create_team(&pool, "Ghosts", "GHO", None, "Men")
            .await
            .unwrap();
        update_team(&pool, team.id, None, None, None, Some(false))
            .await
            .unwrap();

        let active = list_teams(&pool, true, None).await.unwrap();
        assert!(active.is_empty());
        assert!(!team_exists(&pool, team.id).await.unwrap());

        let all = list_teams(&pool, false, None).await.unwrap();
        assert_eq!(all.len(), 1);
        assert!(!all[0].active);
    }

    #[tokio::test]
    async fn test_update_team() {
        let pool = setup_test_pool().await;
        let team = create_team(&pool, "Old Name", "OLD", None, "Men")
            .await
            .unwrap();

        let updated = update_team(&pool, team.id, Some("New Name"), None, None, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.short_name, "OLD");
    }

    #[tokio::test]
    async fn test_roster_lifecycle() {
        let pool = setup_test_pool().await;
        let team = create_team(&pool, "Rovers", "ROV", None, "Women")
            .await
            .unwrap();

        create_player(&pool, team.id, "B Keeper", Some("GK"), Some(1), None)
            .await
            .unwrap();
        create_player(&pool, team.id, "A Forward", Some("FW"), Some(9), None)
            .await
            .unwrap();
        create_player(&pool, team.id, "No Number", None, None, None)
            .await
            .unwrap();

        let roster = list_players(&pool, team.id).await.unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "B Keeper");
        assert_eq!(roster[1].name, "A Forward");
        assert_eq!(roster[2].name, "No Number");
    }

    #[tokio::test]
    async fn test_create_player_unknown_team() {
        let pool = setup_test_pool().await;
        let err = create_player(&pool, 42, "Lost", None, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::NotFound { entity: "team", id: 42 }));
    }
}
