//! Tournament end: freeze the state and build the winner summary.

use crate::models::{
    adjust_color, TeamId, Tournament, TournamentError, TournamentState, TournamentSummary,
};
use chrono::Utc;

/// How much the winner color is darkened for the banner accent.
const ACCENT_SHIFT: i32 = -30;

/// Declare `winner` the tournament winner. Terminal: no further round operations succeed.
pub fn end_tournament(
    tournament: &mut Tournament,
    winner: TeamId,
) -> Result<TournamentSummary, TournamentError> {
    if !matches!(
        tournament.state,
        TournamentState::InProgress | TournamentState::RoundScored
    ) {
        return Err(tournament.invalid("end the tournament"));
    }
    let team = tournament
        .get_team(winner)
        .ok_or(TournamentError::TeamNotFound(winner))?;

    let summary = TournamentSummary {
        team_id: team.id,
        team_name: team.name.clone(),
        color: team.color.clone(),
        accent_color: adjust_color(&team.color, ACCENT_SHIFT).unwrap_or_else(|| team.color.clone()),
        round_wins: tournament.wins_of(winner),
        rounds_to_win: tournament.rounds_to_win,
        finished_at: Utc::now(),
    };

    tournament.started = false;
    tournament.state = TournamentState::Finished;
    tournament.winner = Some(summary.clone());
    log::info!(
        "Tournament {} won by {} ({}/{})",
        tournament.id,
        summary.team_name,
        summary.round_wins,
        summary.rounds_to_win
    );
    Ok(summary)
}
