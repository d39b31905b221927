use std::collections::VecDeque;

use crate::game::Side;

use super::episode::GameRecord;

/// Outcome of one finished game.
#[derive(Debug, Clone, Copy)]
pub struct GameResult {
    pub winner: Option<Side>,
    /// Opponent squares minus player squares.
    pub margin: i32,
    /// Time the opponent spent choosing moves, in milliseconds.
    pub opponent_ms: f64,
}

impl From<&GameRecord> for GameResult {
    fn from(record: &GameRecord) -> Self {
        GameResult {
            winner: record.winner(),
            margin: record.margin(),
            opponent_ms: record.opponent_ms,
        }
    }
}

/// Match metrics tracker with rolling window computations.
pub struct MatchMetrics {
    results: VecDeque<GameResult>,
    capacity: usize,
    total_games: usize, // lifetime count, never capped
    opponent_wins: usize,
    player_wins: usize,
}

impl MatchMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        MatchMetrics {
            results: VecDeque::with_capacity(capacity),
            capacity,
            total_games: 0,
            opponent_wins: 0,
            player_wins: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn record_game(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(Side::Opponent) => self.opponent_wins += 1,
            Some(Side::Player) => self.player_wins += 1,
            None => {}
        }
        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&GameResult) -> bool) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.results.iter().rev().take(n).filter(|r| pred(r)).count();
        hits as f32 / n as f32
    }

    /// Opponent win rate in the last N games.
    pub fn opponent_win_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(Side::Opponent))
    }

    /// Draw rate in the last N games.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    /// Average opponent margin over the last N games.
    pub fn average_margin(&self, last_n: usize) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: i32 = self.results.iter().rev().take(n).map(|r| r.margin).sum();
        total as f32 / n as f32
    }

    /// Mean opponent thinking time per game over the last N games, in milliseconds.
    pub fn average_opponent_ms(&self, last_n: usize) -> f64 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: f64 = self.results.iter().rev().take(n).map(|r| r.opponent_ms).sum();
        total / n as f64
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }

    pub fn opponent_wins(&self) -> usize {
        self.opponent_wins
    }

    pub fn player_wins(&self) -> usize {
        self.player_wins
    }

    pub fn draws(&self) -> usize {
        self.total_games - self.opponent_wins - self.player_wins
    }
}

impl Default for MatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}
