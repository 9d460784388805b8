//! Honours board API endpoints
//!
//! Historical champions per year and category, entered directly rather
//! than derived from fixtures.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::ValidatedJson;
use crate::api::routes::ApiState;
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;
use crate::data::types::HonourRow;

/// Honour DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct HonourDto {
    pub id: i64,
    pub year: i64,
    pub category: String,
    pub team1_id: i64,
    /// Second team for joint winners
    pub team2_id: Option<i64>,
    pub joint_winner: bool,
}

impl From<HonourRow> for HonourDto {
    fn from(row: HonourRow) -> Self {
        Self {
            id: row.id,
            year: row.year,
            category: row.category,
            team1_id: row.team1_id,
            team2_id: row.team2_id,
            joint_winner: row.joint_winner,
        }
    }
}

/// Request body for recording a champion
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordHonourRequest {
    #[validate(range(min = 1900, max = 2200, message = "Year must be 1900-2200"))]
    pub year: i64,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    pub team1_id: i64,

    /// Second team for joint winners
    pub team2_id: Option<i64>,
}

/// Build Honours API routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    let public = Router::new()
        .route("/", get(list_honours))
        .route("/{year}", get(list_honours_for_year))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/", post(record_honour))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin));

    public.merge(admin)
}

/// List the full honours board, most recent year first
#[utoipa::path(
    get,
    path = "/api/v1/honours",
    tag = "honours",
    responses(
        (status = 200, description = "Honours board", body = [HonourDto])
    )
)]
pub async fn list_honours(
    State(state): State<ApiState>,
) -> Result<Json<Vec<HonourDto>>, ApiError> {
    let honours = repo::list_honours(state.database.pool())
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(honours.into_iter().map(HonourDto::from).collect()))
}

/// List honours for a single year
#[utoipa::path(
    get,
    path = "/api/v1/honours/{year}",
    tag = "honours",
    params(("year" = i64, Path, description = "Tournament year")),
    responses(
        (status = 200, description = "Honours for the year", body = [HonourDto]),
        (status = 404, description = "No honours recorded for that year")
    )
)]
pub async fn list_honours_for_year(
    State(state): State<ApiState>,
    Path(year): Path<i64>,
) -> Result<Json<Vec<HonourDto>>, ApiError> {
    let honours = repo::list_honours_for_year(state.database.pool(), year)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(honours.into_iter().map(HonourDto::from).collect()))
}

/// Record a champion (or joint champions)
#[utoipa::path(
    post,
    path = "/api/v1/honours",
    tag = "honours",
    request_body = RecordHonourRequest,
    responses(
        (status = 201, description = "Honour recorded", body = HonourDto),
        (status = 404, description = "Team not found"),
        (status = 409, description = "Honour already recorded for that year and category")
    )
)]
pub async fn record_honour(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<RecordHonourRequest>,
) -> Result<(StatusCode, Json<HonourDto>), ApiError> {
    let honour = repo::record_honour(
        state.database.pool(),
        body.year,
        &body.category,
        body.team1_id,
        body.team2_id,
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    tracing::info!(year = honour.year, category = %honour.category, "Honour recorded");
    Ok((StatusCode::CREATED, Json(HonourDto::from(honour))))
}
