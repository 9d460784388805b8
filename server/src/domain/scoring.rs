//! Scoring rules and standings arithmetic
//!
//! A recorded scoreline is converted into a pair of signed standings
//! deltas, one per team. Retracting a result applies the negated delta,
//! so every standings mutation is reversible by construction.

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_DRAW_POINTS, DEFAULT_LOSS_POINTS, DEFAULT_WIN_POINTS};

/// Points awarded per match outcome
///
/// Defaults to the traditional field-hockey 2/1/0. Configurable so a
/// 3/1/0 football-style table works without code changes. The rule is
/// fixed for the lifetime of the process; changing it mid-edition would
/// corrupt already-accumulated points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringRule {
    pub win: i64,
    pub draw: i64,
    pub loss: i64,
}

impl Default for ScoringRule {
    fn default() -> Self {
        Self {
            win: DEFAULT_WIN_POINTS,
            draw: DEFAULT_DRAW_POINTS,
            loss: DEFAULT_LOSS_POINTS,
        }
    }
}

/// Signed change to one team's standings row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandingDelta {
    pub played: i64,
    pub won: i64,
    pub drawn: i64,
    pub lost: i64,
    pub goals_for: i64,
    pub goals_against: i64,
}

impl StandingDelta {
    /// Deltas for both teams of a recorded scoreline, first element for
    /// the team that scored `for_score`
    pub fn from_scores(team1_score: i64, team2_score: i64) -> (Self, Self) {
        let (w1, d1, l1) = match team1_score.cmp(&team2_score) {
            std::cmp::Ordering::Greater => (1, 0, 0),
            std::cmp::Ordering::Equal => (0, 1, 0),
            std::cmp::Ordering::Less => (0, 0, 1),
        };
        (
            Self {
                played: 1,
                won: w1,
                drawn: d1,
                lost: l1,
                goals_for: team1_score,
                goals_against: team2_score,
            },
            Self {
                played: 1,
                won: l1,
                drawn: d1,
                lost: w1,
                goals_for: team2_score,
                goals_against: team1_score,
            },
        )
    }

    /// The exact inverse of this delta
    pub fn neg(&self) -> Self {
        Self {
            played: -self.played,
            won: -self.won,
            drawn: -self.drawn,
            lost: -self.lost,
            goals_for: -self.goals_for,
            goals_against: -self.goals_against,
        }
    }

    /// Points this delta contributes under a rule
    pub fn points(&self, rule: &ScoringRule) -> i64 {
        self.won * rule.win + self.drawn * rule.draw + self.lost * rule.loss
    }
}

/// Winner of a scoreline, `None` for a draw
pub fn winner_of(team1_id: i64, team2_id: i64, team1_score: i64, team2_score: i64) -> Option<i64> {
    match team1_score.cmp(&team2_score) {
        std::cmp::Ordering::Greater => Some(team1_id),
        std::cmp::Ordering::Less => Some(team2_id),
        std::cmp::Ordering::Equal => None,
    }
}
