//! Standings administration endpoints
//!
//! Reading standings is edition-scoped and lives under
//! `/api/v1/editions/{id}/standings`; this module carries the admin
//! action of flagging a pool winner once a pool concludes.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::ValidatedJson;
use crate::api::routes::ApiState;
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;

/// Request body for flagging a pool winner
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct MarkPoolWinnerRequest {
    pub edition_id: i64,
    pub pool_id: i64,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    /// Explicit winner for dead heats the table cannot resolve;
    /// defaults to the table leader
    pub team_id: Option<i64>,
}

/// Build Standings admin routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    Router::new()
        .route("/pool-winner", post(mark_pool_winner))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin))
}

/// Flag the winner of a pool
///
/// Flags the top standings row under the tie-break order, clearing any
/// previously flagged winner in the same scope. A `team_id` in the body
/// overrides the pick for dead heats. Used when a pool concludes to
/// resolve bracket placeholders.
#[utoipa::path(
    post,
    path = "/api/v1/standings/pool-winner",
    tag = "standings",
    request_body = MarkPoolWinnerRequest,
    responses(
        (status = 204, description = "Pool winner flagged"),
        (status = 404, description = "No standings rows in that pool")
    )
)]
pub async fn mark_pool_winner(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<MarkPoolWinnerRequest>,
) -> Result<StatusCode, ApiError> {
    let winner = repo::mark_pool_winner(
        state.database.pool(),
        body.edition_id,
        body.pool_id,
        &body.category,
        body.team_id,
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    tracing::info!(
        edition_id = body.edition_id,
        pool_id = body.pool_id,
        team_id = winner,
        "Pool winner flagged"
    );
    Ok(StatusCode::NO_CONTENT)
}
