use std::path::Path;

use crate::error::ConfigError;
use crate::game::Side;

/// Rules of a single game.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dots per row.
    pub columns: usize,
    /// Dots per column.
    pub rows: usize,
    pub opponent_starts: bool,
    /// Completing a square grants the mover another turn.
    pub extend_turn_on_score: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            columns: 4,
            rows: 4,
            opponent_starts: false,
            extend_turn_on_score: true,
        }
    }
}

impl GameConfig {
    pub fn starting_side(&self) -> Side {
        Side::from_opponent_flag(self.opponent_starts)
    }
}

/// Opponent search settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OpponentConfig {
    /// Moves beyond the current one considered when scoring a candidate.
    pub lookahead_depth: usize,
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig { lookahead_depth: 3 }
    }
}

/// Game-tree memory settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Arena size above which a session drops branches it can no longer reach.
    pub compact_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            compact_threshold: 200_000,
        }
    }
}

/// Terminal front-end settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Pause before the opponent's move is played, in milliseconds.
    pub opponent_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            opponent_delay_ms: 500,
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub opponent: OpponentConfig,
    pub engine: EngineConfig,
    pub ui: UiConfig,
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
            tracing::warn!(
                path = %path.display(),
                "config file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.columns < 2 {
            return Err(ConfigError::Validation(
                "game.columns must be >= 2".into(),
            ));
        }
        if self.game.rows < 2 {
            return Err(ConfigError::Validation("game.rows must be >= 2".into()));
        }
        if self.opponent.lookahead_depth == 0 {
            return Err(ConfigError::Validation(
                "opponent.lookahead_depth must be >= 1".into(),
            ));
        }
        if self.engine.compact_threshold == 0 {
            return Err(ConfigError::Validation(
                "engine.compact_threshold must be >= 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
