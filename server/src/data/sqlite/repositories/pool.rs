//! Pool and category repository for SQLite operations
//!
//! Pools are reusable group labels (Pool A, Pool B); their per-edition
//! composition lives in `pool_entries`.

use sqlx::SqlitePool;

use crate::data::sqlite::SqliteError;
use crate::data::types::{CategoryRow, PoolMembershipRow, PoolRow};

use super::edition::edition_exists;
use super::team::team_exists;

/// List categories in seeding order, optionally only active ones
pub async fn list_categories(
    pool: &SqlitePool,
    active_only: bool,
) -> Result<Vec<CategoryRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String, i64)>(
        "SELECT id, name, status FROM categories WHERE (? = 0 OR status = 1) ORDER BY id ASC",
    )
    .bind(active_only)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, status)| CategoryRow {
            id,
            name,
            active: status != 0,
        })
        .collect())
}

/// Check whether a category name is known and active
pub async fn category_exists(pool: &SqlitePool, name: &str) -> Result<bool, SqliteError> {
    let exists: bool =
        sqlx::query_scalar("SELECT COUNT(*) > 0 FROM categories WHERE name = ? AND status = 1")
            .bind(name)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Create a new pool label within a category
pub async fn create_pool(
    pool: &SqlitePool,
    name: &str,
    category: &str,
) -> Result<PoolRow, SqliteError> {
    if !category_exists(pool, category).await? {
        return Err(SqliteError::validation(format!(
            "unknown category: {}",
            category
        )));
    }

    let exists: bool =
        sqlx::query_scalar("SELECT COUNT(*) > 0 FROM pools WHERE name = ? AND category = ?")
            .bind(name)
            .bind(category)
            .fetch_one(pool)
            .await?;
    if exists {
        return Err(SqliteError::conflict(format!(
            "pool {} already exists in category {}",
            name, category
        )));
    }

    let result = sqlx::query("INSERT INTO pools (name, category, status) VALUES (?, ?, 1)")
        .bind(name)
        .bind(category)
        .execute(pool)
        .await?;

    Ok(PoolRow {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        category: category.to_string(),
        active: true,
    })
}

/// List active pools, optionally narrowed to a category, ordered by
/// category then name
pub async fn list_pools(
    pool: &SqlitePool,
    category: Option<&str>,
) -> Result<Vec<PoolRow>, SqliteError> {
    let rows = sqlx::query_as::<_, (i64, String, String, i64)>(
        "SELECT id, name, category, status FROM pools WHERE status = 1 AND (? IS NULL OR category = ?) ORDER BY category ASC, name ASC",
    )
    .bind(category)
    .bind(category)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name, category, status)| PoolRow {
            id,
            name,
            category,
            active: status != 0,
        })
        .collect())
}

pub async fn pool_exists(pool: &SqlitePool, id: i64) -> Result<bool, SqliteError> {
    let exists: bool =
        sqlx::query_scalar("SELECT COUNT(*) > 0 FROM pools WHERE id = ? AND status = 1")
            .bind(id)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Enter a team into a pool for one edition
pub async fn add_pool_entry(
    pool: &SqlitePool,
    edition_id: i64,
    pool_id: i64,
    category: &str,
    team_id: i64,
) -> Result<PoolMembershipRow, SqliteError> {
    if !edition_exists(pool, edition_id).await? {
        return Err(SqliteError::not_found("edition", edition_id));
    }
    if !pool_exists(pool, pool_id).await? {
        return Err(SqliteError::not_found("pool", pool_id));
    }
    if !team_exists(pool, team_id).await? {
        return Err(SqliteError::not_found("team", team_id));
    }

    let exists: bool = sqlx::query_scalar(
        "SELECT COUNT(*) > 0 FROM pool_entries WHERE edition_id = ? AND pool_id = ? AND category = ? AND team_id = ?",
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(category)
    .bind(team_id)
    .fetch_one(pool)
    .await?;
    if exists {
        return Err(SqliteError::conflict(format!(
            "team {} is already in pool {} for edition {}",
            team_id, pool_id, edition_id
        )));
    }

    let now = chrono::Utc::now().timestamp();
    let result = sqlx::query(
        "INSERT INTO pool_entries (edition_id, pool_id, category, team_id, created_at, status) VALUES (?, ?, ?, ?, ?, 1)",
    )
    .bind(edition_id)
    .bind(pool_id)
    .bind(category)
    .bind(team_id)
    .bind(now)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();
    get_pool_entry(pool, id)
        .await?
        .ok_or(SqliteError::not_found("pool_entry", id))
}

async fn get_pool_entry(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<PoolMembershipRow>, SqliteError> {
    let row = sqlx::query_as::<_, (i64, i64, i64, String, String, i64, String)>(
        r#"
        SELECT pe.id, pe.edition_id, pe.pool_id, p.name, pe.category, pe.team_id, t.name
        FROM pool_entries pe
        JOIN pools p ON pe.pool_id = p.id
        JOIN teams t ON pe.team_id = t.id
        WHERE pe.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(map_entry))
}

/// List pool membership for an edition, grouped by pool
///
/// Category and pool filters are optional. Joins are inner joins on
/// purpose. A membership row referencing a missing pool or team
/// indicates a broken store and must surface as an error upstream,
/// never as a quietly shorter list.
pub async fn list_pool_entries(
    pool: &SqlitePool,
    edition_id: i64,
    category: Option<&str>,
    pool_id: Option<i64>,
) -> Result<Vec<PoolMembershipRow>, SqliteError> {
    if !edition_exists(pool, edition_id).await? {
        return Err(SqliteError::not_found("edition", edition_id));
    }

    let rows = sqlx::query_as::<_, (i64, i64, i64, String, String, i64, String)>(
        r#"
        SELECT pe.id, pe.edition_id, pe.pool_id, p.name, pe.category, pe.team_id, t.name
        FROM pool_entries pe
        JOIN pools p ON pe.pool_id = p.id
        JOIN teams t ON pe.team_id = t.id
        WHERE pe.edition_id = ? AND pe.status = 1
          AND (? IS NULL OR pe.category = ?)
          AND (? IS NULL OR pe.pool_id = ?)
        ORDER BY pe.pool_id ASC, pe.team_id ASC
        "#,
    )
    .bind(edition_id)
    .bind(category)
    .bind(category)
    .bind(pool_id)
    .bind(pool_id)
    .fetch_all(pool)
    .await?;

    let expected: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM pool_entries WHERE edition_id = ? AND status = 1 AND (? IS NULL OR category = ?) AND (? IS NULL OR pool_id = ?)",
    )
    .bind(edition_id)
    .bind(category)
    .bind(category)
    .bind(pool_id)
    .bind(pool_id)
    .fetch_one(pool)
    .await?;

    if rows.len() as i64 != expected {
        return Err(SqliteError::conflict(format!(
            "pool entries for edition {} reference missing pools or teams",
            edition_id
        )));
    }

    Ok(rows.into_iter().map(map_entry).collect())
}

fn map_entry(
    (id, edition_id, pool_id, pool_name, category, team_id, team_name): (
        i64,
        i64,
        i64,
        String,
        String,
        i64,
        String,
    ),
) -> PoolMembershipRow {
    PoolMembershipRow {
        id,
        edition_id,
        pool_id,
        pool_name,
        category,
        team_id,
        team_name,
    }
}
