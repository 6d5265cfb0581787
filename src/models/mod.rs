//! Data structures for the scorekeeper: players, teams, rounds, tournament state.

mod player;
mod round;
mod team;
mod tournament;

pub use player::{Player, PlayerId};
pub use round::{RoundOutcome, RoundResult, TeamScore, TournamentSummary};
pub use team::{adjust_color, is_hex_color, Team, TeamConfig, TeamId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentState};
