//! Round play: start, eliminations, scoring, and advancing to the next round.

use crate::logic::finish::end_tournament;
use crate::models::{
    PlayerId, RoundOutcome, RoundResult, TeamId, TeamScore, Tournament, TournamentError,
    TournamentState,
};
use chrono::Utc;

/// Start the game: Configured -> InProgress with round 1.
///
/// Calling it again while rounds are running is a no-op. A finished tournament cannot be
/// restarted (reset instead).
pub fn start_game(tournament: &mut Tournament) -> Result<(), TournamentError> {
    match tournament.state {
        TournamentState::Configured => {
            tournament.started = true;
            tournament.current_round = 1;
            tournament.state = TournamentState::InProgress;
            log::info!("Tournament {} started ({})", tournament.id, tournament.name());
            Ok(())
        }
        TournamentState::InProgress | TournamentState::RoundScored => Ok(()),
        TournamentState::Unconfigured | TournamentState::Finished => {
            Err(tournament.invalid("start the game"))
        }
    }
}

/// Eliminate a player for the rest of the current round.
pub fn eliminate_player(
    tournament: &mut Tournament,
    team_id: TeamId,
    player_id: PlayerId,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(tournament.invalid("eliminate a player"));
    }
    let player = tournament
        .get_team_mut(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?
        .get_player_mut(player_id)
        .ok_or(TournamentError::PlayerNotFound(player_id))?;
    if player.eliminated {
        return Err(TournamentError::PlayerAlreadyEliminated(player_id));
    }
    player.eliminate();
    log::debug!("Eliminated {}", player.name);
    Ok(())
}

/// Score the current round.
///
/// Teams are ranked by surviving players with a stable sort, so equal counts keep setup
/// order and the earliest team wins the tie-break. If even the best team has nobody
/// left the round is a tie and no win is credited. A win that reaches `rounds_to_win`
/// ends the tournament.
pub fn end_round(tournament: &mut Tournament) -> Result<RoundResult, TournamentError> {
    if tournament.state != TournamentState::InProgress {
        return Err(tournament.invalid("end the round"));
    }

    let mut scores: Vec<TeamScore> = tournament
        .teams
        .iter()
        .map(|t| TeamScore {
            team_id: t.id,
            team_name: t.name.clone(),
            color: t.color.clone(),
            active_players: t.active_count(),
        })
        .collect();
    scores.sort_by(|a, b| b.active_players.cmp(&a.active_players));

    let outcome = match scores.first() {
        Some(top) if top.active_players > 0 => RoundOutcome::Winner {
            team_id: top.team_id,
            team_name: top.team_name.clone(),
            active_player_count: top.active_players,
        },
        _ => RoundOutcome::Tie,
    };

    let mut result = RoundResult {
        round: tournament.current_round,
        outcome,
        scores,
        tournament_winner: None,
        scored_at: Utc::now(),
    };
    log::info!("Tournament {}: {}", tournament.id, result.announcement());

    let clinched = result
        .winner_id()
        .filter(|w| tournament.wins_of(*w) + 1 >= tournament.rounds_to_win);
    result.tournament_winner = clinched;

    if let Some(winner) = result.winner_id() {
        *tournament.round_wins.entry(winner).or_insert(0) += 1;
    }
    tournament.state = TournamentState::RoundScored;
    tournament.round_history.push(result.clone());

    // The round is fully recorded before the tournament is frozen.
    if let Some(winner) = clinched {
        end_tournament(tournament, winner)?;
    }
    Ok(result)
}

/// Start the next round: everyone is back in and the round counter advances.
pub fn next_round(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::RoundScored {
        return Err(tournament.invalid("start the next round"));
    }
    for player in tournament.teams.iter_mut().flat_map(|t| t.players.iter_mut()) {
        player.revive();
    }
    tournament.current_round += 1;
    tournament.state = TournamentState::InProgress;
    log::info!(
        "Tournament {}: round {} started",
        tournament.id,
        tournament.current_round
    );
    Ok(())
}
