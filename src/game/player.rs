use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two seats in a game. Player one always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the other player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Numeric identifier, 1 or 2
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_id(id: u8) -> Option<Player> {
        match id {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// Index into a `[T; 2]` pair ordered by seat.
    pub fn index(self) -> usize {
        usize::from(self.id() - 1)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.id())
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> u8 {
        player.id()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Player::from_id(id).ok_or_else(|| format!("player id must be 1 or 2, got {id}"))
    }
}

/// Display attributes for a seat. The engine stores these but never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub name: String,
    pub color: String,
}

impl PlayerProfile {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        PlayerProfile {
            name: name.into(),
            color: color.into(),
        }
    }

    /// The profile used for a seat when none is configured.
    pub fn default_for(player: Player) -> Self {
        match player {
            Player::One => PlayerProfile::new("Player 1", "red"),
            Player::Two => PlayerProfile::new("Player 2", "yellow"),
        }
    }
}
