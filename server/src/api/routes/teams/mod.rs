//! Team directory API endpoints

pub mod types;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::routes::ApiState;
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;

use types::{
    CreatePlayerRequest, CreateTeamRequest, ListTeamsQuery, PlayerDto, TeamDto, UpdateTeamRequest,
};

/// Build Teams API routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    let public = Router::new()
        .route("/", get(list_teams))
        .route("/{team_id}", get(get_team))
        .route("/{team_id}/players", get(list_players))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/", post(create_team))
        .route("/{team_id}", patch(update_team))
        .route("/{team_id}/players", post(create_player))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin));

    public.merge(admin)
}

/// List teams, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/v1/teams",
    tag = "teams",
    params(
        ("category" = Option<String>, Query, description = "Filter by category name"),
        ("active_only" = bool, Query, description = "Skip retired teams (default true)")
    ),
    responses(
        (status = 200, description = "List of teams", body = [TeamDto])
    )
)]
pub async fn list_teams(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<ListTeamsQuery>,
) -> Result<Json<Vec<TeamDto>>, ApiError> {
    let teams = repo::list_teams(
        state.database.pool(),
        query.active_only,
        query.category.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok(Json(teams.into_iter().map(TeamDto::from).collect()))
}

/// Get a team by ID
#[utoipa::path(
    get,
    path = "/api/v1/teams/{team_id}",
    tag = "teams",
    params(("team_id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Team details", body = TeamDto),
        (status = 404, description = "Team not found")
    )
)]
pub async fn get_team(
    State(state): State<ApiState>,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamDto>, ApiError> {
    let team = repo::get_team(state.database.pool(), team_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .ok_or_else(|| {
            ApiError::not_found("TEAM_NOT_FOUND", format!("Team {} not found", team_id))
        })?;
    Ok(Json(TeamDto::from(team)))
}

/// Register a new team
#[utoipa::path(
    post,
    path = "/api/v1/teams",
    tag = "teams",
    request_body = CreateTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamDto),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Admin token required")
    )
)]
pub async fn create_team(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<CreateTeamRequest>,
) -> Result<(StatusCode, Json<TeamDto>), ApiError> {
    if !repo::category_exists(state.database.pool(), &body.category)
        .await
        .map_err(ApiError::from_sqlite)?
    {
        return Err(ApiError::bad_request(
            "UNKNOWN_CATEGORY",
            format!("Unknown category: {}", body.category),
        ));
    }

    let team = repo::create_team(
        state.database.pool(),
        &body.name,
        &body.short_name,
        body.logo.as_deref(),
        &body.category,
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    tracing::info!(team_id = team.id, name = %team.name, "Team created");
    Ok((StatusCode::CREATED, Json(TeamDto::from(team))))
}

/// Update a team
#[utoipa::path(
    patch,
    path = "/api/v1/teams/{team_id}",
    tag = "teams",
    params(("team_id" = i64, Path, description = "Team ID")),
    request_body = UpdateTeamRequest,
    responses(
        (status = 200, description = "Team updated", body = TeamDto),
        (status = 404, description = "Team not found")
    )
)]
pub async fn update_team(
    State(state): State<ApiState>,
    Path(team_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateTeamRequest>,
) -> Result<Json<TeamDto>, ApiError> {
    let team = repo::update_team(
        state.database.pool(),
        team_id,
        body.name.as_deref(),
        body.short_name.as_deref(),
        body.logo.as_deref(),
        body.active,
    )
    .await
    .map_err(ApiError::from_sqlite)?
    .ok_or_else(|| {
        ApiError::not_found("TEAM_NOT_FOUND", format!("Team {} not found", team_id))
    })?;
    Ok(Json(TeamDto::from(team)))
}

/// List a team's roster
#[utoipa::path(
    get,
    path = "/api/v1/teams/{team_id}/players",
    tag = "teams",
    params(("team_id" = i64, Path, description = "Team ID")),
    responses(
        (status = 200, description = "Roster players", body = [PlayerDto]),
        (status = 404, description = "Team not found")
    )
)]
pub async fn list_players(
    State(state): State<ApiState>,
    Path(team_id): Path<i64>,
) -> Result<Json<Vec<PlayerDto>>, ApiError> {
    let players = repo::list_players(state.database.pool(), team_id)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(players.into_iter().map(PlayerDto::from).collect()))
}

/// Add a player to a team's roster
#[utoipa::path(
    post,
    path = "/api/v1/teams/{team_id}/players",
    tag = "teams",
    params(("team_id" = i64, Path, description = "Team ID")),
    request_body = CreatePlayerRequest,
    responses(
        (status = 201, description = "Player added", body = PlayerDto),
        (status = 404, description = "Team not found")
    )
)]
pub async fn create_player(
    State(state): State<ApiState>,
    Path(team_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerDto>), ApiError> {
    let player = repo::create_player(
        state.database.pool(),
        team_id,
        &body.name,
        body.position.as_deref(),
        body.jersey_number,
        body.photo.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok((StatusCode::CREATED, Json(PlayerDto::from(player))))
}
