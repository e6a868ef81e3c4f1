use std::path::Path;

use crate::error::ConfigError;
use crate::game::{Player, PlayerProfile, WinScan, DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Largest width or height accepted for a board.
pub const MAX_DIMENSION: usize = 64;

/// Board shape and rules options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub win_scan: WinScan,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            win_scan: WinScan::default(),
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "game.width must be in 1..={MAX_DIMENSION}, got {}",
                self.width
            )));
        }
        if self.height == 0 || self.height > MAX_DIMENSION {
            return Err(ConfigError::Validation(format!(
                "game.height must be in 1..={MAX_DIMENSION}, got {}",
                self.height
            )));
        }
        Ok(())
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    #[serde(deserialize_with = "two_players")]
    pub players: [PlayerProfile; 2],
}

/// Read `[[players]]` as a list and insist on exactly two entries. A plain
/// `[T; 2]` would silently drop any extra tables.
fn two_players<'de, D>(deserializer: D) -> Result<[PlayerProfile; 2], D::Error>
where
    D: serde::Deserializer<'de>,
{
    let players = <Vec<PlayerProfile> as serde::Deserialize>::deserialize(deserializer)?;
    let count = players.len();
    players.try_into().map_err(|_| {
        serde::de::Error::custom(format!("players must list exactly 2 entries, got {count}"))
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            game: GameConfig::default(),
            players: [
                PlayerProfile::default_for(Player::One),
                PlayerProfile::default_for(Player::Two),
            ],
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.game.validate()?;

        for (idx, profile) in self.players.iter().enumerate() {
            if profile.name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "players[{idx}].name must not be empty"
                )));
            }
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
