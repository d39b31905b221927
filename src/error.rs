use std::path::PathBuf;

use crate::game::Line;

/// Why a requested line cannot be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveReason {
    #[error("line is outside the grid")]
    OutOfRange,

    #[error("line is already drawn")]
    AlreadyFilled,
}

/// A call that is only valid in certain game states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Precondition {
    #[error("the game is already over")]
    GameOver,

    #[error("it is not the opponent's turn")]
    NotOpponentsTurn,
}

/// Errors raised by the rules engine. None of them leave state modified.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("illegal move {line}: {reason}")]
    IllegalMove {
        line: Line,
        reason: IllegalMoveReason,
    },

    #[error("invalid geometry {columns}x{rows}: a grid needs at least 2x2 dots")]
    InvalidGeometry { columns: usize, rows: usize },

    #[error("precondition violated: {0}")]
    PreconditionViolation(#[from] Precondition),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
