//! API route handlers

pub mod editions;
pub mod fixtures;
pub mod health;
pub mod honours;
pub mod pools;
pub mod standings;
pub mod teams;

use std::sync::Arc;

use crate::data::SqliteService;
use crate::domain::ResultRecorder;

/// Shared state for API endpoints
#[derive(Clone)]
pub struct ApiState {
    pub database: Arc<SqliteService>,
    pub recorder: Arc<ResultRecorder>,
}
