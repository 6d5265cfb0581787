//! Round results and the final tournament summary handed to the presentation layer.

use crate::models::team::TeamId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Surviving players of one team when a round is scored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamScore {
    pub team_id: TeamId,
    pub team_name: String,
    pub color: String,
    pub active_players: usize,
}

/// How a round ended.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// The team with the most surviving players takes the round.
    Winner {
        team_id: TeamId,
        team_name: String,
        active_player_count: usize,
    },
    /// Every player on every team was eliminated; nobody is credited.
    Tie,
}

/// Result of scoring one round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundResult {
    pub round: u32,
    pub outcome: RoundOutcome,
    /// All teams, most survivors first. Equal counts keep setup order.
    pub scores: Vec<TeamScore>,
    /// Set when this round clinched the tournament.
    pub tournament_winner: Option<TeamId>,
    pub scored_at: DateTime<Utc>,
}

impl RoundResult {
    pub fn winner_id(&self) -> Option<TeamId> {
        match &self.outcome {
            RoundOutcome::Winner { team_id, .. } => Some(*team_id),
            RoundOutcome::Tie => None,
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self.outcome, RoundOutcome::Tie)
    }

    /// Survivors of the winning team (0 on a tie).
    pub fn active_player_count(&self) -> usize {
        match &self.outcome {
            RoundOutcome::Winner {
                active_player_count,
                ..
            } => *active_player_count,
            RoundOutcome::Tie => 0,
        }
    }

    /// One-line announcement, e.g. `Round 2 Winner: Red (Active Players: 3)`.
    pub fn announcement(&self) -> String {
        match &self.outcome {
            RoundOutcome::Winner {
                team_name,
                active_player_count,
                ..
            } => format!(
                "Round {} Winner: {} (Active Players: {})",
                self.round, team_name, active_player_count
            ),
            RoundOutcome::Tie => format!(
                "Round {} ended in a tie - all players terminated!",
                self.round
            ),
        }
    }
}

/// Frozen view of the tournament winner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentSummary {
    pub team_id: TeamId,
    pub team_name: String,
    pub color: String,
    /// Winner color darkened for the banner gradient.
    pub accent_color: String,
    pub round_wins: u32,
    pub rounds_to_win: u32,
    pub finished_at: DateTime<Utc>,
}
