//! Setup phase: build a tournament from the setup form, default team presets.

use crate::models::{is_hex_color, Team, TeamConfig, Tournament, TournamentError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 4;
/// Upper bound on roster size; keeps a single request from allocating without limit.
pub const MAX_PLAYERS_PER_TEAM: usize = 64;

/// Preset names and colors for the first four team slots.
const DEFAULT_TEAMS: [(&str, &str); 4] = [
    ("Red", "#dc3545"),
    ("Blue", "#007bff"),
    ("Green", "#28a745"),
    ("Yellow", "#ffc107"),
];

/// Default name and color for team slot `index` (0-based).
///
/// Slots past the presets get `Team<n>` and a color drawn from an RNG seeded with the
/// slot index, so the same slot always gets the same color.
pub fn default_team_config(index: usize) -> TeamConfig {
    match DEFAULT_TEAMS.get(index) {
        Some((name, color)) => TeamConfig::new(*name, *color),
        None => {
            let mut rng = StdRng::seed_from_u64(index as u64);
            let rgb: u32 = rng.gen_range(0..=0xFF_FFFF);
            TeamConfig::new(format!("Team{}", index + 1), format!("#{:06x}", rgb))
        }
    }
}

/// Default configs for the first `count` team slots.
pub fn default_team_configs(count: usize) -> Vec<TeamConfig> {
    (0..count).map(default_team_config).collect()
}

/// Build a tournament: `num_teams` teams of `players_per_team` players, best of `format`.
///
/// Fails with `InvalidConfiguration` (and builds nothing) when the team count is outside
/// 2..=4, the roster size is outside 1..=64, the format is not a positive odd number,
/// `team_configs` does not have one entry per team, or a color is not `#rrggbb`. Blank
/// team names fall back to the slot default.
pub fn create_tournament(
    num_teams: usize,
    players_per_team: usize,
    format: u32,
    team_configs: Vec<TeamConfig>,
) -> Result<Tournament, TournamentError> {
    if !(MIN_TEAMS..=MAX_TEAMS).contains(&num_teams) {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Please select {}-{} teams",
            MIN_TEAMS, MAX_TEAMS
        )));
    }
    if players_per_team < 1 {
        return Err(TournamentError::InvalidConfiguration(
            "Please select at least 1 player per team".to_string(),
        ));
    }
    if players_per_team > MAX_PLAYERS_PER_TEAM {
        return Err(TournamentError::InvalidConfiguration(format!(
            "At most {} players per team",
            MAX_PLAYERS_PER_TEAM
        )));
    }
    if format == 0 || format % 2 == 0 {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Best of {} is not a valid format (must be odd)",
            format
        )));
    }
    if team_configs.len() != num_teams {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Expected {} team configs, got {}",
            num_teams,
            team_configs.len()
        )));
    }
    if let Some(bad) = team_configs.iter().find(|c| !is_hex_color(&c.color)) {
        return Err(TournamentError::InvalidConfiguration(format!(
            "Team color {:?} is not a #rrggbb color",
            bad.color
        )));
    }

    let teams = team_configs
        .into_iter()
        .enumerate()
        .map(|(i, config)| {
            let name = config.name.trim();
            let config = if name.is_empty() {
                TeamConfig::new(default_team_config(i).name, config.color)
            } else {
                TeamConfig::new(name, config.color)
            };
            Team::new(config, players_per_team)
        })
        .collect();

    let tournament = Tournament::new(format, teams);
    log::info!(
        "Created tournament {} ({}, {} teams x {} players)",
        tournament.id,
        tournament.name(),
        num_teams,
        players_per_team
    );
    Ok(tournament)
}
