use crate::config::AppConfig;
use crate::error::GameError;
use crate::session::Session;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use super::cursor::Cursor;

pub struct App {
    session: Session,
    config: AppConfig,
    cursor: Cursor,
    should_quit: bool,
    message: Option<String>,
    /// When the opponent is allowed to move next.
    opponent_due: Option<Instant>,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self, GameError> {
        let session =
            Session::new(&config.game)?.with_compact_threshold(config.engine.compact_threshold);
        Ok(App {
            session,
            config,
            cursor: Cursor::new(),
            should_quit: false,
            message: None,
            opponent_due: None,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()>
    where
        B::Error: Into<io::Error>,
    {
        loop {
            terminal.draw(|f| self.render(f)).map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
            self.tick(Instant::now());
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Let the opponent move once its delay has passed.
    pub fn tick(&mut self, now: Instant) {
        if self.session.is_terminal() || !self.session.turn_is_opponent() {
            self.opponent_due = None;
            return;
        }

        let due = *self
            .opponent_due
            .get_or_insert(now + Duration::from_millis(self.config.ui.opponent_delay_ms));
        if now < due {
            return;
        }
        self.opponent_due = None;

        match self.session.choose_move(self.config.opponent.lookahead_depth) {
            Ok(_) => self.after_move(),
            Err(e) => self.message = Some(format!("Opponent failed: {e}")),
        }
    }

    /// Handle key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let grid = self.session.board().grid();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.cursor.left(),
            KeyCode::Right => self.cursor.right(grid),
            KeyCode::Up => self.cursor.up(),
            KeyCode::Down => self.cursor.down(grid),
            KeyCode::Tab => self.cursor.toggle(grid),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.draw_line();
            }
            KeyCode::Char('r') => self.restart(),
            _ => {}
        }
    }

    fn restart(&mut self) {
        match self.session.reset(&self.config.game) {
            Ok(()) => {
                self.cursor = Cursor::new();
                self.opponent_due = None;
                self.message = Some("New game started!".to_string());
            }
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    /// Draw the line under the cursor for the player.
    fn draw_line(&mut self) {
        if self.session.is_terminal() {
            self.message = Some("Game over! Press 'r' to restart.".to_string());
            return;
        }
        if self.session.turn_is_opponent() {
            self.message = Some("Wait for the opponent to move.".to_string());
            return;
        }

        match self.session.apply_move(self.cursor.line()) {
            Ok(_) => self.after_move(),
            Err(e) => self.message = Some(e.to_string()),
        }
    }

    fn after_move(&mut self) {
        let board = self.session.board();
        if board.is_terminal() {
            let (player, opponent) = (board.player_score(), board.opponent_score());
            self.message = Some(match player.cmp(&opponent) {
                std::cmp::Ordering::Greater => format!("You win {player}-{opponent}!"),
                std::cmp::Ordering::Less => format!("Opponent wins {opponent}-{player}!"),
                std::cmp::Ordering::Equal => format!("It's a draw, {player}-{opponent}!"),
            });
        } else if let Some(mv) = self.session.last_move().filter(|mv| mv.scored()) {
            self.message = Some(format!(
                "{} completed {} square(s)",
                mv.side.name(),
                mv.completed.len()
            ));
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.cursor.line(), &self.message);
    }
}
