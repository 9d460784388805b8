//! Team API types

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::{PlayerRow, TeamRow};

/// Team DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub logo: Option<String>,
    pub category: String,
    pub active: bool,
}

impl From<TeamRow> for TeamDto {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            short_name: row.short_name,
            logo: row.logo,
            category: row.category,
            active: row.active,
        }
    }
}

/// Roster player DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerDto {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub jersey_number: Option<i64>,
    pub photo: Option<String>,
}

impl From<PlayerRow> for PlayerDto {
    fn from(row: PlayerRow) -> Self {
        Self {
            id: row.id,
            team_id: row.team_id,
            name: row.name,
            position: row.position,
            jersey_number: row.jersey_number,
            photo: row.photo,
        }
    }
}

/// Request body for creating a team
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Short name must be 1-50 characters"))]
    pub short_name: String,

    pub logo: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,
}

/// Request body for updating a team
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, max = 250, message = "Name must be 1-250 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "Short name must be 1-50 characters"))]
    pub short_name: Option<String>,

    pub logo: Option<String>,
    pub active: Option<bool>,
}

/// Request body for adding a roster player
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePlayerRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[validate(length(max = 50, message = "Position must be at most 50 characters"))]
    pub position: Option<String>,

    #[validate(range(min = 0, max = 999, message = "Jersey number must be 0-999"))]
    pub jersey_number: Option<i64>,

    pub photo: Option<String>,
}

/// Query params for listing teams
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListTeamsQuery {
    /// Optional category filter
    pub category: Option<String>,

    /// Skip retired teams; on by default
    #[serde(default = "default_true")]
    pub active_only: bool,
}

fn default_true() -> bool {
    true
}
