use std::time::Instant;

use serde::Serialize;

use crate::ai::{Agent, AveragingOpponent, RandomAgent};
use crate::config::AppConfig;
use crate::error::GameError;
use crate::game::{Move, Side};
use crate::session::Session;

use super::metrics::MatchMetrics;

/// Everything worth keeping from a finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub columns: usize,
    pub rows: usize,
    pub extend_turn_on_score: bool,
    pub player_agent: String,
    pub opponent_agent: String,
    pub moves: Vec<Move>,
    pub player_score: u32,
    pub opponent_score: u32,
    /// Time the opponent spent choosing moves, in milliseconds.
    pub opponent_ms: f64,
}

impl GameRecord {
    /// Side with more squares, `None` on a tie.
    pub fn winner(&self) -> Option<Side> {
        match self.opponent_score.cmp(&self.player_score) {
            std::cmp::Ordering::Greater => Some(Side::Opponent),
            std::cmp::Ordering::Less => Some(Side::Player),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Opponent squares minus player squares.
    pub fn margin(&self) -> i32 {
        self.opponent_score as i32 - self.player_score as i32
    }
}

/// Play the session's game to the end, asking each agent for a line on its turn.
pub fn play_game(
    session: &mut Session,
    player: &mut dyn Agent,
    opponent: &mut dyn Agent,
) -> Result<GameRecord, GameError> {
    let mut opponent_ms = 0.0;

    while !session.is_terminal() {
        let node = session.current();
        let line = if session.turn_is_opponent() {
            let started = Instant::now();
            let line = opponent.select_line(session.tree_mut(), node)?;
            opponent_ms += started.elapsed().as_secs_f64() * 1000.0;
            line
        } else {
            player.select_line(session.tree_mut(), node)?
        };
        session.apply_move(line)?;
    }

    let grid = session.board().grid();
    let record = GameRecord {
        columns: grid.columns(),
        rows: grid.rows(),
        extend_turn_on_score: session.board().extend_turn_on_score(),
        player_agent: player.name().to_string(),
        opponent_agent: opponent.name().to_string(),
        moves: session.history().to_vec(),
        player_score: session.player_score(),
        opponent_score: session.opponent_score(),
        opponent_ms,
    };
    tracing::info!(
        player = record.player_score,
        opponent = record.opponent_score,
        winner = record.winner().map_or("draw", Side::name),
        opponent_ms = record.opponent_ms,
        "game finished"
    );
    Ok(record)
}

/// Play `games` games of the averaging opponent against a seeded random player.
pub fn play_match(
    config: &AppConfig,
    games: usize,
    base_seed: u64,
) -> Result<(Vec<GameRecord>, MatchMetrics), GameError> {
    let mut metrics = MatchMetrics::with_capacity(games.max(1));
    let mut records = Vec::with_capacity(games);
    let mut opponent = AveragingOpponent::new(config.opponent.lookahead_depth);

    for game_idx in 0..games {
        let mut session =
            Session::new(&config.game)?.with_compact_threshold(config.engine.compact_threshold);
        let mut player = RandomAgent::with_seed(episode_seed(base_seed, game_idx));
        let record = play_game(&mut session, &mut player, &mut opponent)?;
        metrics.record_game((&record).into());
        records.push(record);
    }

    tracing::info!(
        games = metrics.total_games(),
        opponent_wins = metrics.opponent_wins(),
        player_wins = metrics.player_wins(),
        draws = metrics.draws(),
        "match finished"
    );
    Ok((records, metrics))
}

/// Derive a deterministic seed for a given game index.
pub fn episode_seed(base_seed: u64, game_index: usize) -> u64 {
    // FNV-1a-inspired mixing for deterministic, well-distributed seeds
    let mut hash = base_seed ^ 0x517cc1b727220a95;
    let index = game_index as u64;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index;
    hash = hash.wrapping_mul(0x100000001b3);
    hash ^= index >> 32;
    hash
}
