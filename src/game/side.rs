use serde::Serialize;

/// The two sides of a game: the human player and the automated opponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    /// Get the other side
    pub fn other(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }

    pub fn is_opponent(self) -> bool {
        self == Side::Opponent
    }

    pub fn from_opponent_flag(is_opponent: bool) -> Side {
        if is_opponent {
            Side::Opponent
        } else {
            Side::Player
        }
    }

    /// Get side name for display
    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Opponent => "Opponent",
        }
    }
}
