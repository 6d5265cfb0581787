//! Team, TeamConfig, and color helpers.

use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a team (keys `round_wins`).
pub type TeamId = Uuid;

/// Name and color chosen for one team slot during setup.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TeamConfig {
    pub name: String,
    /// CSS hex color, e.g. `#dc3545`.
    pub color: String,
}

impl TeamConfig {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A team and its fixed roster.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub color: String,
    pub players: Vec<Player>,
}

impl Team {
    /// Build a team with `players_per_team` players named `<team>-Player-<n>` (1-based).
    pub fn new(config: TeamConfig, players_per_team: usize) -> Self {
        let players = (1..=players_per_team)
            .map(|n| Player::new(format!("{}-Player-{}", config.name, n)))
            .collect();
        Self {
            id: Uuid::new_v4(),
            name: config.name,
            color: config.color,
            players,
        }
    }

    /// Number of players not eliminated this round.
    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| !p.eliminated).count()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }
}

/// True for a `#rrggbb` color (6 hex digits after the `#`).
pub fn is_hex_color(color: &str) -> bool {
    color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Shift each RGB channel of a `#rrggbb` color by `amount`, clamped to 0..=255.
/// Returns `None` if `color` is not a 6-digit hex color.
pub fn adjust_color(color: &str, amount: i32) -> Option<String> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 {
        return None;
    }
    let num = u32::from_str_radix(hex, 16).ok()?;
    let shift = |channel: u32| (channel as i32 + amount).clamp(0, 255) as u32;
    let r = shift(num >> 16);
    let g = shift((num >> 8) & 0xFF);
    let b = shift(num & 0xFF);
    Some(format!("#{:06x}", (r << 16) | (g << 8) | b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn team_players_are_named_after_team() {
        let team = Team::new(TeamConfig::new("Blue", "#007bff"), 3);
        let names: Vec<_> = team.players.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Blue-Player-1", "Blue-Player-2", "Blue-Player-3"]);
        assert_eq!(team.active_count(), 3);
    }

    #[test]
    fn adjust_color_darkens_and_clamps() {
        assert_eq!(adjust_color("#dc3545", -30).as_deref(), Some("#be1727"));
        assert_eq!(adjust_color("#101010", -30).as_deref(), Some("#000000"));
        assert_eq!(adjust_color("#fafafa", 30).as_deref(), Some("#ffffff"));
        assert_eq!(adjust_color("red", -30), None);
    }

    #[test]
    fn hex_color_needs_hash_and_six_digits() {
        assert!(is_hex_color("#dc3545"));
        assert!(is_hex_color("#ABCDEF"));
        assert!(!is_hex_color("dc3545"));
        assert!(!is_hex_color("#+c3545"));
        assert!(!is_hex_color("#fff"));
        assert!(!is_hex_color("red\" onmouseover=\"alert(1)"));
    }
}
