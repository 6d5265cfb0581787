//! TournamentEngine: the owned state machine the presentation layer drives.
//!
//! The engine holds at most one tournament. Operations validate first and mutate
//! second, so a failed call leaves the state untouched.

use crate::logic;
use crate::models::{
    PlayerId, RoundResult, TeamConfig, TeamId, Tournament, TournamentError, TournamentState,
    TournamentSummary,
};
use serde::{Deserialize, Serialize};

/// A destructive action the user has to confirm before it is executed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PendingAction {
    EliminatePlayer { team_id: TeamId, player_id: PlayerId },
    Reset,
}

/// Returned instead of executing a [`PendingAction`] that has not been confirmed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRequired {
    pub action: PendingAction,
    pub prompt: String,
}

#[derive(Clone, Debug, Default)]
pub struct TournamentEngine {
    tournament: Option<Tournament>,
}

impl TournamentEngine {
    /// A fresh engine with no tournament.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> TournamentState {
        self.tournament
            .as_ref()
            .map_or(TournamentState::Unconfigured, |t| t.state)
    }

    pub fn tournament(&self) -> Option<&Tournament> {
        self.tournament.as_ref()
    }

    fn current_mut(&mut self, action: &'static str) -> Result<&mut Tournament, TournamentError> {
        self.tournament
            .as_mut()
            .ok_or(TournamentError::InvalidTransition {
                action,
                state: TournamentState::Unconfigured,
            })
    }

    /// Set up a new tournament. The engine must be unconfigured (reset first).
    pub fn create_tournament(
        &mut self,
        num_teams: usize,
        players_per_team: usize,
        format: u32,
        team_configs: Vec<TeamConfig>,
    ) -> Result<&Tournament, TournamentError> {
        if let Some(existing) = &self.tournament {
            return Err(existing.invalid("create a tournament"));
        }
        let tournament =
            logic::create_tournament(num_teams, players_per_team, format, team_configs)?;
        Ok(self.tournament.insert(tournament))
    }

    pub fn start_game(&mut self) -> Result<&Tournament, TournamentError> {
        let t = self.current_mut("start the game")?;
        logic::start_game(t)?;
        Ok(t)
    }

    pub fn eliminate_player(
        &mut self,
        team_id: TeamId,
        player_id: PlayerId,
    ) -> Result<&Tournament, TournamentError> {
        let t = self.current_mut("eliminate a player")?;
        logic::eliminate_player(t, team_id, player_id)?;
        Ok(t)
    }

    pub fn end_round(&mut self) -> Result<RoundResult, TournamentError> {
        logic::end_round(self.current_mut("end the round")?)
    }

    pub fn next_round(&mut self) -> Result<&Tournament, TournamentError> {
        let t = self.current_mut("start the next round")?;
        logic::next_round(t)?;
        Ok(t)
    }

    pub fn end_tournament(&mut self, winner: TeamId) -> Result<TournamentSummary, TournamentError> {
        logic::end_tournament(self.current_mut("end the tournament")?, winner)
    }

    /// Drop all tournament state. Always succeeds.
    pub fn reset(&mut self) {
        if let Some(t) = self.tournament.take() {
            log::info!("Tournament {} reset", t.id);
        }
    }

    /// Describe what the user is about to confirm. Ids are checked against the current
    /// tournament so the prompt can name the player.
    pub fn confirmation(
        &self,
        action: PendingAction,
    ) -> Result<ConfirmationRequired, TournamentError> {
        let prompt = match action {
            PendingAction::EliminatePlayer { team_id, player_id } => {
                let tournament = self
                    .tournament
                    .as_ref()
                    .ok_or(TournamentError::InvalidTransition {
                        action: "eliminate a player",
                        state: TournamentState::Unconfigured,
                    })?;
                let player = tournament
                    .get_team(team_id)
                    .ok_or(TournamentError::TeamNotFound(team_id))?
                    .get_player(player_id)
                    .ok_or(TournamentError::PlayerNotFound(player_id))?;
                format!("Terminate {}?", player.name)
            }
            PendingAction::Reset => "Are you sure you want to reset the tournament?".to_string(),
        };
        Ok(ConfirmationRequired { action, prompt })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::default_team_configs;

    #[test]
    fn operations_before_setup_are_rejected() {
        let mut engine = TournamentEngine::new();
        assert_eq!(engine.state(), TournamentState::Unconfigured);
        assert!(matches!(
            engine.start_game(),
            Err(TournamentError::InvalidTransition {
                state: TournamentState::Unconfigured,
                ..
            })
        ));
        assert!(engine.end_round().is_err());
        assert!(engine.next_round().is_err());
    }

    #[test]
    fn create_twice_requires_reset() {
        let mut engine = TournamentEngine::new();
        engine
            .create_tournament(2, 1, 3, default_team_configs(2))
            .unwrap();
        assert!(matches!(
            engine.create_tournament(3, 1, 3, default_team_configs(3)),
            Err(TournamentError::InvalidTransition {
                state: TournamentState::Configured,
                ..
            })
        ));
        engine.reset();
        assert_eq!(engine.state(), TournamentState::Unconfigured);
        assert_eq!(
            engine
                .create_tournament(3, 1, 3, default_team_configs(3))
                .unwrap()
                .teams
                .len(),
            3
        );
    }

    #[test]
    fn failed_create_leaves_engine_unconfigured() {
        let mut engine = TournamentEngine::new();
        assert!(matches!(
            engine.create_tournament(5, 2, 3, default_team_configs(5)),
            Err(TournamentError::InvalidConfiguration(_))
        ));
        assert_eq!(engine.state(), TournamentState::Unconfigured);
        assert!(engine.tournament().is_none());
    }

    #[test]
    fn confirmation_names_the_player() {
        let mut engine = TournamentEngine::new();
        let t = engine
            .create_tournament(2, 2, 3, default_team_configs(2))
            .unwrap();
        let team_id = t.teams[1].id;
        let player_id = t.teams[1].players[0].id;
        let c = engine
            .confirmation(PendingAction::EliminatePlayer { team_id, player_id })
            .unwrap();
        assert_eq!(c.prompt, "Terminate Blue-Player-1?");
        assert_eq!(
            engine.confirmation(PendingAction::Reset).unwrap().prompt,
            "Are you sure you want to reset the tournament?"
        );
        assert!(matches!(
            engine.confirmation(PendingAction::EliminatePlayer {
                team_id,
                player_id: team_id
            }),
            Err(TournamentError::PlayerNotFound(_))
        ));
    }
}
