//! Fixture, result, and scoring detail API endpoints
//!
//! All result writes go through the result recorder so the standings
//! ledger moves atomically with the result itself.

pub mod types;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use axum::{Json, Router};

use crate::api::auth::{AuthState, require_admin};
use crate::api::extractors::ValidatedJson;
use crate::api::routes::ApiState;
use crate::api::types::ApiError;
use crate::data::sqlite::repositories as repo;
use crate::data::sqlite::repositories::fixture::{FixturePatch, NewFixture};
use crate::data::types::Slot;

use types::{
    AddScoringDetailRequest, CreateFixtureRequest, FixtureDto, RecordResultRequest, ResultDto,
    ScoringDetailDto, UpdateFixtureRequest,
};

/// Build Fixtures API routes
pub fn routes(state: ApiState, auth: AuthState) -> Router<()> {
    let public = Router::new()
        .route("/{fixture_id}", get(get_fixture))
        .route("/{fixture_id}/result", get(get_result))
        .route("/{fixture_id}/scoring", get(list_scoring_details))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/", post(create_fixture))
        .route("/{fixture_id}", patch(update_fixture).delete(delete_fixture))
        .route(
            "/{fixture_id}/result",
            post(record_result).put(update_result).delete(delete_result),
        )
        .route("/{fixture_id}/scoring", post(add_scoring_detail))
        .with_state(state)
        .layer(axum::middleware::from_fn_with_state(auth, require_admin));

    public.merge(admin)
}

/// Schedule a fixture
#[utoipa::path(
    post,
    path = "/api/v1/fixtures",
    tag = "fixtures",
    request_body = CreateFixtureRequest,
    responses(
        (status = 201, description = "Fixture scheduled", body = FixtureDto),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "Referenced edition, pool, or team not found")
    )
)]
pub async fn create_fixture(
    State(state): State<ApiState>,
    ValidatedJson(body): ValidatedJson<CreateFixtureRequest>,
) -> Result<(StatusCode, Json<FixtureDto>), ApiError> {
    let fixture = repo::create_fixture(
        state.database.pool(),
        NewFixture {
            edition_id: body.edition_id,
            match_at: body.match_at.timestamp(),
            label: body.label,
            category: body.category,
            match_number: body.match_number,
            pool_id: body.pool_id,
            team1: Slot::from_wire(body.team1_id),
            team2: Slot::from_wire(body.team2_id),
            slot1: body.slot1,
            slot2: body.slot2,
        },
    )
    .await
    .map_err(ApiError::from_sqlite)?;

    tracing::info!(fixture_id = fixture.id, "Fixture scheduled");
    Ok((StatusCode::CREATED, Json(FixtureDto::from(fixture))))
}

/// Get a fixture by ID
#[utoipa::path(
    get,
    path = "/api/v1/fixtures/{fixture_id}",
    tag = "fixtures",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    responses(
        (status = 200, description = "Fixture details", body = FixtureDto),
        (status = 404, description = "Fixture not found")
    )
)]
pub async fn get_fixture(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
) -> Result<Json<FixtureDto>, ApiError> {
    let fixture = repo::get_fixture(state.database.pool(), fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .ok_or_else(|| {
            ApiError::not_found(
                "FIXTURE_NOT_FOUND",
                format!("Fixture {} not found", fixture_id),
            )
        })?;
    Ok(Json(FixtureDto::from(fixture)))
}

/// Update a fixture (reschedule, relabel, fill bracket slots)
#[utoipa::path(
    patch,
    path = "/api/v1/fixtures/{fixture_id}",
    tag = "fixtures",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    request_body = UpdateFixtureRequest,
    responses(
        (status = 200, description = "Fixture updated", body = FixtureDto),
        (status = 404, description = "Fixture not found"),
        (status = 409, description = "Participants frozen on a completed fixture")
    )
)]
pub async fn update_fixture(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<UpdateFixtureRequest>,
) -> Result<Json<FixtureDto>, ApiError> {
    let fixture = repo::update_fixture(
        state.database.pool(),
        fixture_id,
        FixturePatch {
            match_at: body.match_at.map(|t| t.timestamp()),
            label: body.label,
            match_number: body.match_number,
            team1: body.team1_id.map(|id| Slot::from_wire(Some(id))),
            team2: body.team2_id.map(|id| Slot::from_wire(Some(id))),
            report_file: body.report_file,
        },
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok(Json(FixtureDto::from(fixture)))
}

/// Delete a fixture, retracting its result and standings contribution
#[utoipa::path(
    delete,
    path = "/api/v1/fixtures/{fixture_id}",
    tag = "fixtures",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    responses(
        (status = 204, description = "Fixture deleted"),
        (status = 404, description = "Fixture not found")
    )
)]
pub async fn delete_fixture(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .recorder
        .delete_fixture(fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get the result recorded for a fixture
#[utoipa::path(
    get,
    path = "/api/v1/fixtures/{fixture_id}/result",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    responses(
        (status = 200, description = "Recorded result", body = ResultDto),
        (status = 404, description = "Fixture or result not found")
    )
)]
pub async fn get_result(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
) -> Result<Json<ResultDto>, ApiError> {
    if repo::get_fixture(state.database.pool(), fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .is_none()
    {
        return Err(ApiError::not_found(
            "FIXTURE_NOT_FOUND",
            format!("Fixture {} not found", fixture_id),
        ));
    }
    let result = repo::get_result_by_fixture(state.database.pool(), fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?
        .ok_or_else(|| {
            ApiError::not_found(
                "RESULT_NOT_FOUND",
                format!("Fixture {} has no recorded result", fixture_id),
            )
        })?;
    Ok(Json(ResultDto::from(result)))
}

/// Record the final score of a fixture
#[utoipa::path(
    post,
    path = "/api/v1/fixtures/{fixture_id}/result",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    request_body = RecordResultRequest,
    responses(
        (status = 201, description = "Result recorded", body = ResultDto),
        (status = 400, description = "Participant still unresolved"),
        (status = 409, description = "Result already recorded")
    )
)]
pub async fn record_result(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<RecordResultRequest>,
) -> Result<(StatusCode, Json<ResultDto>), ApiError> {
    let result = state
        .recorder
        .record_result(
            fixture_id,
            body.team1_score,
            body.team2_score,
            body.summary.as_deref(),
        )
        .await
        .map_err(ApiError::from_sqlite)?;

    tracing::info!(
        fixture_id,
        score = format!("{}-{}", body.team1_score, body.team2_score),
        "Result recorded"
    );
    Ok((StatusCode::CREATED, Json(ResultDto::from(result))))
}

/// Correct an already recorded result
#[utoipa::path(
    put,
    path = "/api/v1/fixtures/{fixture_id}/result",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    request_body = RecordResultRequest,
    responses(
        (status = 200, description = "Result corrected", body = ResultDto),
        (status = 404, description = "Fixture or result not found")
    )
)]
pub async fn update_result(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<RecordResultRequest>,
) -> Result<Json<ResultDto>, ApiError> {
    let result = state
        .recorder
        .update_result(
            fixture_id,
            body.team1_score,
            body.team2_score,
            body.summary.as_deref(),
        )
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(ResultDto::from(result)))
}

/// Retract a recorded result, reopening the fixture
#[utoipa::path(
    delete,
    path = "/api/v1/fixtures/{fixture_id}/result",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    responses(
        (status = 204, description = "Result retracted"),
        (status = 404, description = "Fixture or result not found")
    )
)]
pub async fn delete_result(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .recorder
        .delete_result(fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(StatusCode::NO_CONTENT)
}

/// List per-player scoring details for a fixture
#[utoipa::path(
    get,
    path = "/api/v1/fixtures/{fixture_id}/scoring",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    responses(
        (status = 200, description = "Scoring details", body = [ScoringDetailDto]),
        (status = 404, description = "Fixture not found")
    )
)]
pub async fn list_scoring_details(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
) -> Result<Json<Vec<ScoringDetailDto>>, ApiError> {
    let details = repo::list_scoring_details(state.database.pool(), fixture_id)
        .await
        .map_err(ApiError::from_sqlite)?;
    Ok(Json(details.into_iter().map(ScoringDetailDto::from).collect()))
}

/// Append a player's scoring detail for a fixture
#[utoipa::path(
    post,
    path = "/api/v1/fixtures/{fixture_id}/scoring",
    tag = "results",
    params(("fixture_id" = i64, Path, description = "Fixture ID")),
    request_body = AddScoringDetailRequest,
    responses(
        (status = 201, description = "Detail recorded", body = ScoringDetailDto),
        (status = 400, description = "Player does not play for that team"),
        (status = 404, description = "Fixture or player not found")
    )
)]
pub async fn add_scoring_detail(
    State(state): State<ApiState>,
    Path(fixture_id): Path<i64>,
    ValidatedJson(body): ValidatedJson<AddScoringDetailRequest>,
) -> Result<(StatusCode, Json<ScoringDetailDto>), ApiError> {
    let detail = repo::add_scoring_detail(
        state.database.pool(),
        fixture_id,
        body.team_id,
        body.player_id,
        repo::NewScoringDetail {
            goals: body.goals,
            green_cards: body.green_cards,
            yellow_cards: body.yellow_cards,
            red_cards: body.red_cards,
            fouls: body.fouls,
        },
    )
    .await
    .map_err(ApiError::from_sqlite)?;
    Ok((StatusCode::CREATED, Json(ScoringDetailDto::from(detail))))
}
