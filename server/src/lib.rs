//! Tournament backend server
//!
//! Stores and serves tournament editions, fixtures, results, rosters,
//! standings and historical honours for a multi-year, multi-category
//! hockey tournament.

mod app;

pub mod api;
pub mod core;
pub mod data;
pub mod domain;
