//! Player data structure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used in elimination requests and lookups).
pub type PlayerId = Uuid;

/// A player on a team. Membership never changes once the tournament is set up.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Still standing in the current round (always `!eliminated`, kept for display).
    pub active: bool,
    /// Knocked out of the current round. Cleared when the next round starts.
    pub eliminated: bool,
}

impl Player {
    /// Create a new player with the given name, active and not eliminated.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            active: true,
            eliminated: false,
        }
    }

    /// Mark the player as eliminated for the rest of the round.
    pub fn eliminate(&mut self) {
        self.eliminated = true;
        self.active = false;
    }

    /// Bring the player back for a new round.
    pub fn revive(&mut self) {
        self.eliminated = false;
        self.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eliminate_and_revive_keep_active_in_sync() {
        let mut p = Player::new("Red-Player-1");
        assert!(p.active && !p.eliminated);
        p.eliminate();
        assert!(!p.active && p.eliminated);
        p.revive();
        assert!(p.active && !p.eliminated);
    }
}
