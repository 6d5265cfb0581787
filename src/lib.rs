//! Elimination scorekeeper: library with models, round logic, and the tournament engine.

pub mod engine;
pub mod logic;
pub mod models;

pub use engine::{ConfirmationRequired, PendingAction, TournamentEngine};
pub use logic::{
    create_tournament, default_team_config, default_team_configs, eliminate_player, end_round,
    end_tournament, next_round, start_game,
};
pub use models::{
    Player, PlayerId, RoundOutcome, RoundResult, Team, TeamConfig, TeamId, TeamScore, Tournament,
    TournamentError, TournamentId, TournamentState, TournamentSummary,
};
