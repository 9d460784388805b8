//! Shared row types for the transactional store

use serde::{Deserialize, Serialize};

/// A fixture participant slot.
///
/// Bracket fixtures ("winner of pool A vs winner of pool B") are
/// scheduled before the participant is known. The legacy wire format
/// overloaded team id `0` for this; internally the slot is an explicit
/// sum type so an unresolved participant can never collide with a real
/// id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Unresolved,
    Team(i64),
}

impl Slot {
    /// Decode from a stored column (NULL = unresolved)
    pub fn from_db(value: Option<i64>) -> Self {
        match value {
            Some(id) => Self::Team(id),
            None => Self::Unresolved,
        }
    }

    /// Decode from an API payload. Both `null` and the legacy `0`
    /// sentinel mean unresolved.
    pub fn from_wire(value: Option<i64>) -> Self {
        match value {
            Some(id) if id > 0 => Self::Team(id),
            _ => Self::Unresolved,
        }
    }

    pub fn to_db(self) -> Option<i64> {
        match self {
            Self::Team(id) => Some(id),
            Self::Unresolved => None,
        }
    }

    pub fn team_id(self) -> Option<i64> {
        self.to_db()
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Team(_))
    }
}

// ============================================================================
// Team directory
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub logo: Option<String>,
    pub category: String,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRow {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub position: Option<String>,
    pub jersey_number: Option<i64>,
    pub photo: Option<String>,
    pub active: bool,
}

// ============================================================================
// Edition registry
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditionRow {
    pub id: i64,
    pub year: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolRow {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub active: bool,
}

/// One (pool, team) membership pair for an edition, joined to display names
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolMembershipRow {
    pub id: i64,
    pub edition_id: i64,
    pub pool_id: i64,
    pub pool_name: String,
    pub category: String,
    pub team_id: i64,
    pub team_name: String,
}

// ============================================================================
// Fixture ledger
// ============================================================================

#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub id: i64,
    pub edition_id: i64,
    /// Scheduled kickoff, unix seconds
    pub match_at: i64,
    pub label: String,
    pub category: String,
    pub match_number: i64,
    /// Pool this fixture counts towards; bracket fixtures have none
    pub pool_id: Option<i64>,
    pub team1: Slot,
    pub team2: Slot,
    /// Bracket placeholders: pool whose winner fills the slot
    pub slot1: Option<i64>,
    pub slot2: Option<i64>,
    pub winner_id: Option<i64>,
    pub completed: bool,
    pub report_file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: i64,
    pub fixture_id: i64,
    pub team1_score: i64,
    pub team2_score: i64,
    pub winner_id: Option<i64>,
    pub summary: Option<String>,
    pub updated_at: i64,
}

// ============================================================================
// Standings
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub id: i64,
    pub edition_id: i64,
    pub pool_id: i64,
    pub category: String,
    pub team_id: i64,
    pub team_name: String,
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
    pub goal_diff: i64,
    pub points: i64,
    pub pool_winner: bool,
}

// ============================================================================
// Honours
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HonourRow {
    pub id: i64,
    pub year: i64,
    pub category: String,
    pub team1_id: i64,
    pub team2_id: Option<i64>,
    pub joint_winner: bool,
}

// ============================================================================
// Per-player scoring detail (append-only side log)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringDetailRow {
    pub id: i64,
    pub fixture_id: i64,
    pub team_id: i64,
    pub player_id: i64,
    pub goals: i64,
    pub green_cards: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub fouls: i64,
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_from_db() {
        assert_eq!(Slot::from_db(None), Slot::Unresolved);
        assert_eq!(Slot::from_db(Some(7)), Slot::Team(7));
    }

    #[test]
    fn test_slot_from_wire_legacy_zero() {
        assert_eq!(Slot::from_wire(Some(0)), Slot::Unresolved);
        assert_eq!(Slot::from_wire(None), Slot::Unresolved);
        assert_eq!(Slot::from_wire(Some(3)), Slot::Team(3));
    }

    #[test]
    fn test_slot_roundtrip() {
        assert_eq!(Slot::from_db(Slot::Team(5).to_db()), Slot::Team(5));
        assert_eq!(Slot::from_db(Slot::Unresolved.to_db()), Slot::Unresolved);
    }
}
