//! Tournament business logic: setup, rounds, and the tournament end.

mod finish;
mod rounds;
mod setup;

pub use finish::end_tournament;
pub use rounds::{eliminate_player, end_round, next_round, start_game};
pub use setup::{
    create_tournament, default_team_config, default_team_configs, MAX_PLAYERS_PER_TEAM, MAX_TEAMS,
    MIN_TEAMS,
};
