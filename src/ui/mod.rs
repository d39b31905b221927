//! Terminal UI for playing against the averaging opponent.

mod app;
mod cursor;
mod game_view;

pub use app::App;
pub use cursor::Cursor;
