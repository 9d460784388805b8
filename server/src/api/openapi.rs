//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{editions, fixtures, health, honours, pools, standings, teams};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tourney API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Hockey tournament backend"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "teams", description = "Team directory and rosters"),
        (name = "editions", description = "Yearly tournament editions"),
        (name = "pools", description = "Categories, pools, and pool membership"),
        (name = "fixtures", description = "Match scheduling"),
        (name = "results", description = "Match results and scoring details"),
        (name = "standings", description = "Pool standings tables"),
        (name = "honours", description = "Historical champions board")
    ),
    paths(
        // Health
        health::health,
        // Teams
        teams::list_teams,
        teams::get_team,
        teams::create_team,
        teams::update_team,
        teams::list_players,
        teams::create_player,
        // Editions
        editions::list_editions,
        editions::create_edition,
        editions::list_fixtures,
        editions::list_results,
        editions::list_pool_entries,
        editions::get_standings,
        // Categories and pools
        pools::list_categories,
        pools::list_pools,
        pools::create_pool,
        pools::add_pool_entry,
        // Fixtures
        fixtures::create_fixture,
        fixtures::get_fixture,
        fixtures::update_fixture,
        fixtures::delete_fixture,
        // Results
        fixtures::get_result,
        fixtures::record_result,
        fixtures::update_result,
        fixtures::delete_result,
        fixtures::list_scoring_details,
        fixtures::add_scoring_detail,
        // Standings
        standings::mark_pool_winner,
        // Honours
        honours::list_honours,
        honours::list_honours_for_year,
        honours::record_honour,
    ),
    components(schemas(
        // Health
        health::HealthResponse,
        // Teams
        teams::types::TeamDto,
        teams::types::PlayerDto,
        teams::types::CreateTeamRequest,
        teams::types::UpdateTeamRequest,
        teams::types::CreatePlayerRequest,
        teams::types::ListTeamsQuery,
        // Editions
        editions::types::EditionDto,
        editions::types::PoolMembershipDto,
        editions::types::StandingDto,
        editions::types::CreateEditionRequest,
        editions::types::ListEditionsQuery,
        editions::types::CategoryFilterQuery,
        editions::types::PoolEntriesQuery,
        editions::types::StandingsQuery,
        // Categories and pools
        pools::CategoryDto,
        pools::PoolDto,
        pools::CreatePoolRequest,
        pools::AddPoolEntryRequest,
        pools::ListPoolsQuery,
        pools::ListCategoriesQuery,
        // Fixtures and results
        fixtures::types::FixtureDto,
        fixtures::types::ResultDto,
        fixtures::types::ScoringDetailDto,
        fixtures::types::CreateFixtureRequest,
        fixtures::types::UpdateFixtureRequest,
        fixtures::types::RecordResultRequest,
        fixtures::types::AddScoringDetailRequest,
        // Standings
        standings::MarkPoolWinnerRequest,
        // Honours
        honours::HonourDto,
        honours::RecordHonourRequest,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Tourney API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;
