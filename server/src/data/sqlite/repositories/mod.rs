//! SQLite repositories
//!
//! Row types (TeamRow, FixtureRow, etc.) should be imported from
//! `crate::data::types`.

pub mod edition;
pub mod fixture;
pub mod honour;
pub mod pool;
pub mod result;
pub mod scoring;
pub mod standing;
pub mod team;

pub use edition::{create_edition, edition_exists, get_edition, list_editions};
pub use fixture::{
    FixturePatch, NewFixture, create_fixture, get_fixture, list_fixtures, update_fixture,
};
pub use honour::{list_for_year as list_honours_for_year, list_honours, record_honour};
pub use pool::{
    add_pool_entry, category_exists, create_pool, list_categories, list_pool_entries, list_pools,
    pool_exists,
};
pub use result::{get_by_fixture as get_result_by_fixture, list_for_edition as list_results_for_edition};
pub use scoring::{NewScoringDetail, add_detail as add_scoring_detail, list_for_fixture as list_scoring_details};
pub use standing::{get_standings, mark_pool_winner};
pub use team::{
    create_player, create_team, get_team, list_players, list_teams, team_exists, update_team,
};
