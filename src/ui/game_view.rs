use std::collections::HashMap;

use crate::game::{Line, Side, Square};
use crate::session::Session;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn side_color(side: Side) -> Color {
    match side {
        Side::Player => Color::Green,
        Side::Opponent => Color::Blue,
    }
}

pub fn render(frame: &mut Frame, session: &Session, cursor: Line, message: &Option<String>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(7),    // Board
            Constraint::Length(3), // Message
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, session, chunks[0]);
    render_board(frame, session, cursor, chunks[1]);
    render_message(frame, message, chunks[2]);
    render_controls(frame, chunks[3]);
}

fn render_header(frame: &mut Frame, session: &Session, area: Rect) {
    let board = session.board();
    let turn = board.turn();
    let status = if board.is_terminal() {
        "Game over".to_string()
    } else if turn.is_opponent() {
        "Opponent's turn".to_string()
    } else {
        "Your turn".to_string()
    };

    let header = Paragraph::new(TextLine::from(vec![
        Span::styled(
            status,
            Style::default()
                .fg(side_color(turn))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            format!("You {}", board.player_score()),
            Style::default().fg(side_color(Side::Player)),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Opponent {}", board.opponent_score()),
            Style::default().fg(side_color(Side::Opponent)),
        ),
        Span::raw(format!(
            "  |  move {}/{}",
            board.moves_made(),
            board.grid().line_count()
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Dots and Boxes"));

    frame.render_widget(header, area);
}

fn line_span(
    line: Line,
    drawn_by: &HashMap<Line, Side>,
    cursor: Line,
    filled: &'static str,
    empty: &'static str,
) -> Span<'static> {
    let selected = line == cursor;
    match drawn_by.get(&line) {
        Some(&side) => {
            let mut style = Style::default().fg(side_color(side));
            if selected {
                style = style.bg(Color::DarkGray);
            }
            Span::styled(filled, style)
        }
        None if selected => Span::styled(
            filled,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        None => Span::raw(empty),
    }
}

fn render_board(frame: &mut Frame, session: &Session, cursor: Line, area: Rect) {
    let grid = session.board().grid();
    let drawn_by: HashMap<Line, Side> = session
        .history()
        .iter()
        .map(|mv| (mv.line, mv.side))
        .collect();
    let owners = session.square_owners();
    let dot = Style::default().fg(Color::Yellow);

    let mut lines = Vec::with_capacity(grid.rows() * 2);
    for j in 0..grid.rows() {
        // Dots and horizontal lines
        let mut spans = Vec::new();
        for i in 0..grid.columns() {
            spans.push(Span::styled("●", dot));
            if i + 1 < grid.columns() {
                spans.push(line_span(
                    Line::horizontal(i, j),
                    &drawn_by,
                    cursor,
                    "───",
                    "   ",
                ));
            }
        }
        lines.push(TextLine::from(spans));

        if j + 1 == grid.rows() {
            break;
        }

        // Vertical lines and square interiors
        let mut spans = Vec::new();
        for i in 0..grid.columns() {
            spans.push(line_span(Line::vertical(i, j), &drawn_by, cursor, "│", " "));
            if i + 1 < grid.columns() {
                spans.push(match owners.get(&Square { i, j }) {
                    Some(&Side::Player) => Span::styled(
                        " P ",
                        Style::default().fg(Color::Black).bg(side_color(Side::Player)),
                    ),
                    Some(&Side::Opponent) => Span::styled(
                        " O ",
                        Style::default().fg(Color::White).bg(side_color(Side::Opponent)),
                    ),
                    None => Span::raw("   "),
                });
            }
        }
        lines.push(TextLine::from(spans));
    }

    let board_widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(board_widget, area);
}

fn render_message(frame: &mut Frame, message: &Option<String>, area: Rect) {
    let text = message.as_deref().unwrap_or("");
    let msg_widget = Paragraph::new(text)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(msg_widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let controls = Paragraph::new("Arrows: Move  |  Tab: Flip  |  Enter: Draw  |  R: Restart  |  Q: Quit")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(controls, area);
}
