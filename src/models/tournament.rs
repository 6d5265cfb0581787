//! Tournament and TournamentState.

use crate::models::player::PlayerId;
use crate::models::round::{RoundResult, TournamentSummary};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Setup parameters out of bounds (team count, players per team, format, team configs).
    InvalidConfiguration(String),
    /// Operation not allowed in the current state.
    InvalidTransition {
        action: &'static str,
        state: TournamentState,
    },
    /// No team with this id in the tournament.
    TeamNotFound(TeamId),
    /// No player with this id on the given team.
    PlayerNotFound(PlayerId),
    /// The player is already out for this round.
    PlayerAlreadyEliminated(PlayerId),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidConfiguration(reason) => {
                write!(f, "Invalid configuration: {}", reason)
            }
            TournamentError::InvalidTransition { action, state } => {
                write!(f, "Cannot {} while tournament is {}", action, state)
            }
            TournamentError::TeamNotFound(_) => write!(f, "Team not found"),
            TournamentError::PlayerNotFound(_) => write!(f, "Player not found"),
            TournamentError::PlayerAlreadyEliminated(_) => {
                write!(f, "Player is already eliminated this round")
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// No tournament set up (engine only).
    #[default]
    Unconfigured,
    /// Teams created; game not started.
    Configured,
    /// A round is running; players can be eliminated.
    InProgress,
    /// Current round scored; waiting for the next round.
    RoundScored,
    /// A team reached the required round wins. Terminal.
    Finished,
}

impl std::fmt::Display for TournamentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TournamentState::Unconfigured => "unconfigured",
            TournamentState::Configured => "configured",
            TournamentState::InProgress => "in progress",
            TournamentState::RoundScored => "between rounds",
            TournamentState::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Full tournament state: teams, round counters, wins, and phase.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    /// The N in "best of N".
    pub format: u32,
    /// `ceil(format / 2)`.
    pub rounds_to_win: u32,
    /// 0 before the game starts, then 1-based.
    pub current_round: u32,
    /// True while rounds are being played; false before start and after the end.
    pub started: bool,
    pub state: TournamentState,
    pub teams: Vec<Team>,
    pub round_wins: HashMap<TeamId, u32>,
    /// Every scored round, oldest first.
    pub round_history: Vec<RoundResult>,
    /// Set once a team clinches.
    pub winner: Option<TournamentSummary>,
}

impl Tournament {
    /// Create a tournament in Configured state. Bounds are checked by `create_tournament`.
    pub fn new(format: u32, teams: Vec<Team>) -> Self {
        let round_wins = teams.iter().map(|t| (t.id, 0)).collect();
        Self {
            id: Uuid::new_v4(),
            format,
            rounds_to_win: format.div_ceil(2),
            current_round: 0,
            started: false,
            state: TournamentState::Configured,
            teams,
            round_wins,
            round_history: Vec::new(),
            winner: None,
        }
    }

    /// Display name, e.g. `Best of 5`.
    pub fn name(&self) -> String {
        format!("Best of {}", self.format)
    }

    pub fn get_team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_team_mut(&mut self, id: TeamId) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    /// Round wins for a team (0 for unknown ids).
    pub fn wins_of(&self, id: TeamId) -> u32 {
        self.round_wins.get(&id).copied().unwrap_or(0)
    }

    pub fn is_finished(&self) -> bool {
        self.state == TournamentState::Finished
    }

    /// Shorthand for building an `InvalidTransition` from the current state.
    pub(crate) fn invalid(&self, action: &'static str) -> TournamentError {
        TournamentError::InvalidTransition {
            action,
            state: self.state,
        }
    }
}
