//! Tournament domain logic
//!
//! Scoring rules, standings arithmetic, and the serialized result
//! recorder that keeps the standings ledger consistent.

pub mod recorder;
pub mod scoring;

pub use recorder::ResultRecorder;
pub use scoring::{ScoringRule, StandingDelta};
