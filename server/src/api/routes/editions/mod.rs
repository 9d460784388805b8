//! Edition API endpoints
//!
//! Editions are the yearly tournament instances. Edition-scoped
//! listings (fixtures, results, pool membership, standings) live here.

pub mod types;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::routes::ApiState;
use crate::api::routes::fixtures::types::{FixtureDto, ResultDto};
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;

use types::{
    CategoryFilterQuery, CreateEditionRequest, EditionDto, ListEditionsQuery, PoolEntriesQuery,
    PoolMembershipDto, StandingDto, StandingsQuery,
};

/// Build Editions API routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    let public = Router::new()
        .route("/", get(list_editions))
        .route("/{edition_id}/fixtures", get(list_fixtures))
        .route("/{edition_id}/results", get(list_results))
        .route("/{edition_id}/pools", get(list_pool_entries))
        .route("/{edition_id}/standings", get(get_standings))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/", post(create_edition))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin));

    public.merge(admin)
}

/// List all editions, most recent year first
#[utoipa::path(
    get,
    path = "/api/v1/editions",
    tag = "editions",
    params(
        ("active_only" = bool, Query, description = "Skip archived editions")
    ),
    responses(
        (status = 200, description = "List of editions", body = [EditionDto])
    )
)]
pub async fn list_editions(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<ListEditionsQuery>,
) -> Result<Json<Vec<EditionDto>>, ApiError> {
    let editions = repo::list_editions(state.database.pool(), query.active_only)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(editions.into_iter().map(EditionDto::from).collect()))
}

/// Create a new edition
#[utoipa::path(
    post,
    path = "/api/v1/editions",
    tag = "editions",
    request_body = CreateEditionRequest,
    responses(
        (status = 201, description = "Edition created", body = EditionDto),
        (status = 409, description = "Year already exists")
    )
)]
pub async fn create_edition(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<CreateEditionRequest>,
) -> Result<(StatusCode, Json<EditionDto>), ApiError> {
    let edition = repo::create_edition(state.database.pool(), &body.year)
        .await
        .map_err(ApiError::from_sqlite)?;

    tracing::info!(edition_id = edition.id, year = %edition.year, "Edition created");
    Ok((StatusCode::CREATED, Json(EditionDto::from(edition))))
}

/// List an edition's fixtures in kickoff order
#[utoipa::path(
    get,
    path = "/api/v1/editions/{edition_id}/fixtures",
    tag = "fixtures",
    params(
        ("edition_id" = i64, Path, description = "Edition ID"),
        ("category" = Option<String>, Query, description = "Filter by category name")
    ),
    responses(
        (status = 200, description = "Fixtures in kickoff order", body = [FixtureDto]),
        (status = 404, description = "Edition not found")
    )
)]
pub async fn list_fixtures(
    State(state): State<ApiState>,
    Path(edition_id): Path<i64>,
    ValidatedQuery(query): ValidatedQuery<CategoryFilterQuery>,
) -> Result<Json<Vec<FixtureDto>>, ApiError> {
    let fixtures = repo::list_fixtures(
        state.database.pool(),
        edition_id,
        query.category.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok(Json(fixtures.into_iter().map(FixtureDto::from).collect()))
}

/// List all recorded results for an edition
#[utoipa::path(
    get,
    path = "/api/v1/editions/{edition_id}/results",
    tag = "results",
    params(("edition_id" = i64, Path, description = "Edition ID")),
    responses(
        (status = 200, description = "Results in fixture kickoff order", body = [ResultDto]),
        (status = 404, description = "Edition not found")
    )
)]
pub async fn list_results(
    State(state): State<ApiState>,
    Path(edition_id): Path<i64>,
) -> Result<Json<Vec<ResultDto>>, ApiError> {
    let results = repo::list_results_for_edition(state.database.pool(), edition_id)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(results.into_iter().map(ResultDto::from).collect()))
}

/// List pool membership for an edition
#[utoipa::path(
    get,
    path = "/api/v1/editions/{edition_id}/pools",
    tag = "pools",
    params(
        ("edition_id" = i64, Path, description = "Edition ID"),
        ("category" = Option<String>, Query, description = "Filter by category name"),
        ("pool_id" = Option<i64>, Query, description = "Filter to one pool")
    ),
    responses(
        (status = 200, description = "Pool membership grouped by pool", body = [PoolMembershipDto]),
        (status = 404, description = "Edition not found")
    )
)]
pub async fn list_pool_entries(
    State(state): State<ApiState>,
    Path(edition_id): Path<i64>,
    ValidatedQuery(query): ValidatedQuery<PoolEntriesQuery>,
) -> Result<Json<Vec<PoolMembershipDto>>, ApiError> {
    let entries = repo::list_pool_entries(
        state.database.pool(),
        edition_id,
        query.category.as_deref(),
        query.pool_id,
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok(Json(entries.into_iter().map(PoolMembershipDto::from).collect()))
}

/// Get standings tables for an edition, optionally narrowed to one pool
/// or category
#[utoipa::path(
    get,
    path = "/api/v1/editions/{edition_id}/standings",
    tag = "standings",
    params(
        ("edition_id" = i64, Path, description = "Edition ID"),
        ("pool_id" = Option<i64>, Query, description = "Filter to one pool"),
        ("category" = Option<String>, Query, description = "Filter by category name")
    ),
    responses(
        (status = 200, description = "Standings ordered by points, goal difference, goals scored", body = [StandingDto]),
        (status = 404, description = "Edition not found")
    )
)]
pub async fn get_standings(
    State(state): State<ApiState>,
    Path(edition_id): Path<i64>,
    ValidatedQuery(query): ValidatedQuery<StandingsQuery>,
) -> Result<Json<Vec<StandingDto>>, ApiError> {
    let standings = repo::get_standings(
        state.database.pool(),
        edition_id,
        query.pool_id,
        query.category.as_deref(),
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok(Json(standings.into_iter().map(StandingDto::from).collect()))
}
