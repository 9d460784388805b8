//! Edition API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::{EditionRow, PoolMembershipRow, StandingRow};

/// Edition DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct EditionDto {
    pub id: i64,
    pub year: String,
    pub active: bool,
}

impl From<EditionRow> for EditionDto {
    fn from(row: EditionRow) -> Self {
        Self {
            id: row.id,
            year: row.year,
            active: row.active,
        }
    }
}

/// One team's membership of a pool for this edition
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolMembershipDto {
    pub pool_id: i64,
    pub pool_name: String,
    pub category: String,
    pub team_id: i64,
    pub team_name: String,
}

impl From<PoolMembershipRow> for PoolMembershipDto {
    fn from(row: PoolMembershipRow) -> Self {
        Self {
            pool_id: row.pool_id,
            pool_name: row.pool_name,
            category: row.category,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}

/// One row of a pool standings table
#[derive(Debug, Serialize, ToSchema)]
pub struct StandingDto {
    pub team_id: i64,
    pub team_name: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_diff: i64,
    pub points: i64,
    pub pool_winner: bool,
}

impl From<StandingRow> for StandingDto {
    fn from(row: StandingRow) -> Self {
        Self {
            team_id: row.team_id,
            team_name: row.team_name,
            played: row.played,
            won: row.won,
            drawn: row.drawn,
            lost: row.lost,
            goals_for: row.goals_for,
            goals_against: row.goals_against,
            goal_diff: row.goal_diff,
            points: row.points,
            pool_winner: row.pool_winner,
        }
    }
}

/// Request body for creating an edition
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEditionRequest {
    /// Year label, e.g. "2025" or "2025/26"
    #[validate(length(min = 1, max = 20, message = "Year must be 1-20 characters"))]
    pub year: String,
}

/// Query params for listing editions
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListEditionsQuery {
    /// Skip archived editions
    #[serde(default)]
    pub active_only: bool,
}

/// Optional category filter for edition-scoped listings
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CategoryFilterQuery {
    pub category: Option<String>,
}

/// Optional category and pool scope for membership listings
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PoolEntriesQuery {
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,

    pub pool_id: Option<i64>,
}

/// Optional pool and category scope of a standings query
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StandingsQuery {
    pub pool_id: Option<i64>,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,
}
