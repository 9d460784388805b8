//! Fixture and result API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::types::{FixtureRow, ResultRow, ScoringDetailRow};

/// Fixture DTO for API responses
///
/// Unresolved bracket participants serialize as `null`, never as a
/// placeholder id.
#[derive(Debug, Serialize, ToSchema)]
pub struct FixtureDto {
    pub id: i64,
    pub edition_id: i64,
    pub match_at: DateTime<Utc>,
    pub label: String,
    pub category: String,
    pub match_number: i64,
    pub pool_id: Option<i64>,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub slot1: Option<i64>,
    pub slot2: Option<i64>,
    pub winner_id: Option<i64>,
    pub completed: bool,
    pub report_file: Option<String>,
}

impl From<FixtureRow> for FixtureDto {
    fn from(row: FixtureRow) -> Self {
        Self {
            id: row.id,
            edition_id: row.edition_id,
            match_at: DateTime::from_timestamp(row.match_at, 0).unwrap_or_else(Utc::now),
            label: row.label,
            category: row.category,
            match_number: row.match_number,
            pool_id: row.pool_id,
            team1_id: row.team1.team_id(),
            team2_id: row.team2.team_id(),
            slot1: row.slot1,
            slot2: row.slot2,
            winner_id: row.winner_id,
            completed: row.completed,
            report_file: row.report_file,
        }
    }
}

/// Result DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ResultDto {
    pub id: i64,
    pub fixture_id: i64,
    pub team1_score: i64,
    pub team2_score: i64,
    /// `null` for a draw
    pub winner_id: Option<i64>,
    pub summary: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<ResultRow> for ResultDto {
    fn from(row: ResultRow) -> Self {
        Self {
            id: row.id,
            fixture_id: row.fixture_id,
            team1_score: row.team1_score,
            team2_score: row.team2_score,
            winner_id: row.winner_id,
            summary: row.summary,
            updated_at: DateTime::from_timestamp(row.updated_at, 0).unwrap_or_else(Utc::now),
        }
    }
}

/// Per-player scoring detail DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct ScoringDetailDto {
    pub id: i64,
    pub fixture_id: i64,
    pub team_id: i64,
    pub player_id: i64,
    pub goals: i64,
    pub green_cards: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub fouls: i64,
}

impl From<ScoringDetailRow> for ScoringDetailDto {
    fn from(row: ScoringDetailRow) -> Self {
        Self {
            id: row.id,
            fixture_id: row.fixture_id,
            team_id: row.team_id,
            player_id: row.player_id,
            goals: row.goals,
            green_cards: row.green_cards,
            yellow_cards: row.yellow_cards,
            red_cards: row.red_cards,
            fouls: row.fouls,
        }
    }
}

/// Request body for scheduling a fixture
///
/// `team1_id`/`team2_id` accept `null` (or the legacy `0`) for a
/// not-yet-known bracket participant; `slot1`/`slot2` then name the
/// pool whose winner fills the slot.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateFixtureRequest {
    pub edition_id: i64,
    pub match_at: DateTime<Utc>,

    #[validate(length(min = 1, max = 255, message = "Label must be 1-255 characters"))]
    pub label: String,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    #[validate(range(min = 1, message = "Match number must be >= 1"))]
    pub match_number: i64,

    pub pool_id: Option<i64>,
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,
    pub slot1: Option<i64>,
    pub slot2: Option<i64>,
}

/// Request body for updating a fixture
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateFixtureRequest {
    pub match_at: Option<DateTime<Utc>>,

    #[validate(length(min = 1, max = 255, message = "Label must be 1-255 characters"))]
    pub label: Option<String>,

    #[validate(range(min = 1, message = "Match number must be >= 1"))]
    pub match_number: Option<i64>,

    /// Present to (re)assign the slot; legacy `0` clears it
    pub team1_id: Option<i64>,
    pub team2_id: Option<i64>,

    /// Absent leaves the report file alone; an explicit `null` clears it
    #[validate(length(max = 255, message = "Report file must be at most 255 characters"))]
    #[serde(default, deserialize_with = "present_field")]
    #[schema(value_type = Option<String>)]
    pub report_file: Option<Option<String>>,
}

/// Distinguishes an absent JSON field (`None`) from an explicit `null`
/// (`Some(None)`)
fn present_field<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Request body for recording or correcting a result
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordResultRequest {
    #[validate(range(min = 0, max = 99, message = "Score must be 0-99"))]
    pub team1_score: i64,

    #[validate(range(min = 0, max = 99, message = "Score must be 0-99"))]
    pub team2_score: i64,

    #[validate(length(max = 2000, message = "Summary must be at most 2000 characters"))]
    pub summary: Option<String>,
}

/// Request body for appending a player's scoring detail
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddScoringDetailRequest {
    pub team_id: i64,
    pub player_id: i64,

    #[validate(range(min = 0, max = 99, message = "Goals must be 0-99"))]
    #[serde(default)]
    pub goals: i64,

    #[validate(range(min = 0, max = 9, message = "Card counts must be 0-9"))]
    #[serde(default)]
    pub green_cards: i64,

    #[validate(range(min = 0, max = 9, message = "Card counts must be 0-9"))]
    #[serde(default)]
    pub yellow_cards: i64,

    #[validate(range(min = 0, max = 9, message = "Card counts must be 0-9"))]
    #[serde(default)]
    pub red_cards: i64,

    #[validate(range(min = 0, max = 99, message = "Fouls must be 0-99"))]
    #[serde(default)]
    pub fouls: i64,
}
