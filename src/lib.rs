//! # Dots and Boxes
//!
//! A dots-and-boxes rules engine with a look-ahead opponent that scores each
//! candidate move by averaging outcomes over a lazily built game tree.
//! Ships with a terminal UI built with Ratatui and a headless match runner.
//!
//! ## Modules
//!
//! - [`game`]: Grid geometry, board state, move application, game tree
//! - [`ai`]: Agent trait, averaging opponent, random player
//! - [`session`]: A game in progress on top of the shared game tree
//! - [`play`]: Headless games between agents and match metrics
//! - [`ui`]: Terminal UI for playing against the opponent
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
pub mod session;
pub mod ui;
