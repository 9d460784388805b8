//! Pool and category API endpoints

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::{ValidatedJson, ValidatedQuery};
use crate::api::routes::ApiState;
use crate::api::routes::editions::types::PoolMembershipDto;
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;
use crate::data::types::{CategoryRow, PoolRow};

/// Category DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
}

impl From<CategoryRow> for CategoryDto {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

/// Pool DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolDto {
    pub id: i64,
    pub name: String,
    pub category: String,
}

impl From<PoolRow> for PoolDto {
    fn from(row: PoolRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            category: row.category,
        }
    }
}

/// Request body for creating a pool
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePoolRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,
}

/// Request body for entering a team into a pool for an edition
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddPoolEntryRequest {
    pub edition_id: i64,

    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: String,

    pub team_id: i64,
}

/// Query params for listing pools
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListPoolsQuery {
    #[validate(length(min = 1, max = 50, message = "Category must be 1-50 characters"))]
    pub category: Option<String>,
}

/// Query params for listing categories
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListCategoriesQuery {
    /// Skip retired categories; on by default
    #[serde(default = "default_true")]
    pub active_only: bool,
}

fn default_true() -> bool {
    true
}

/// Build Pools API routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    let public = Router::new()
        .route("/", get(list_pools))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/", post(create_pool))
        .route("/{pool_id}/entries", post(add_pool_entry))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin));

    public.merge(admin)
}

/// Build Categories API routes
pub fn category_routes(state: ApiState) -> Router<()> {
    Router::new()
        .route("/", get(list_categories))
        .with_state(state)
}

/// List the tournament categories
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    tag = "pools",
    params(
        ("active_only" = bool, Query, description = "Skip retired categories (default true)")
    ),
    responses(
        (status = 200, description = "List of categories", body = [CategoryDto])
    )
)]
pub async fn list_categories(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<ListCategoriesQuery>,
) -> Result<Json<Vec<CategoryDto>>, ApiError> {
    let categories = repo::list_categories(state.database.pool(), query.active_only)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(categories.into_iter().map(CategoryDto::from).collect()))
}

/// List pools, optionally narrowed to a category
#[utoipa::path(
    get,
    path = "/api/v1/pools",
    tag = "pools",
    params(("category" = Option<String>, Query, description = "Filter by category name")),
    responses(
        (status = 200, description = "Pools ordered by category and name", body = [PoolDto])
    )
)]
pub async fn list_pools(
    State(state): State<ApiState>,
    ValidatedQuery(query): ValidatedQuery<ListPoolsQuery>,
) -> Result<Json<Vec<PoolDto>>, ApiError> {
    let pools = repo::list_pools(state.database.pool(), query.category.as_deref())
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(pools.into_iter().map(PoolDto::from).collect()))
}

/// Create a new pool label
#[utoipa::path(
    post,
    path = "/api/v1/pools",
    tag = "pools",
    request_body = CreatePoolRequest,
    responses(
        (status = 201, description = "Pool created", body = PoolDto),
        (status = 409, description = "Pool already exists in category")
    )
)]
pub async fn create_pool(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<CreatePoolRequest>,
) -> Result<(StatusCode, Json<PoolDto>), ApiError> {
    let pool = repo::create_pool(state.database.pool(), &body.name, &body.category)
        .await
        .map_err(ApiError::from_sqlite)?;

    tracing::info!(pool_id = pool.id, name = %pool.name, "Pool created");
    Ok((StatusCode::CREATED, Json(PoolDto::from(pool))))
}

/// Enter a team into a pool for one edition
#[utoipa::path(
    post,
    path = "/api/v1/pools/{pool_id}/entries",
    tag = "pools",
    params(("pool_id" = i64, Path, description = "Pool ID")),
    request_body = AddPoolEntryRequest,
    responses(
        (status = 201, description = "Team entered into pool", body = PoolMembershipDto),
        (status = 404, description = "Edition, pool, or team not found"),
        (status = 409, description = "Team already in pool for this edition")
    )
)]
pub async fn add_pool_entry(
    State(state): State<ApiState>,
    Path(pool_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<AddPoolEntryRequest>,
) -> Result<(StatusCode, Json<PoolMembershipDto>), ApiError> {
    let entry = repo::add_pool_entry(
        state.database.pool(),
        body.edition_id,
        pool_id,
        &body.category,
        body.team_id,
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok((StatusCode::CREATED, Json(PoolMembershipDto::from(entry))))
}
