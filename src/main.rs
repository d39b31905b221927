use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use dots_and_boxes::config::AppConfig;
use dots_and_boxes::play::play_match;
use dots_and_boxes::ui::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

/// Play dots and boxes against a look-ahead opponent.
#[derive(Parser)]
#[command(name = "dots_and_boxes", about = "Play dots and boxes against a look-ahead opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "dots.toml")]
    config: PathBuf,

    /// Override number of dot columns
    #[arg(long)]
    columns: Option<usize>,

    /// Override number of dot rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override opponent look-ahead depth
    #[arg(long)]
    depth: Option<usize>,

    /// Override whether the opponent makes the first move
    #[arg(long)]
    opponent_starts: Option<bool>,

    /// Override whether completing a square grants another move
    #[arg(long)]
    extend_turn: Option<bool>,

    /// Play opponent vs random games without the TUI
    #[arg(long)]
    headless: bool,

    /// Number of games in headless mode
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Base seed for the random player in headless mode
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Print headless game records as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    apply_overrides(&cli, &mut app_config);
    app_config.validate().context("invalid configuration")?;

    if cli.headless {
        run_headless(&app_config, cli.games, cli.seed, cli.json)
    } else {
        run_tui(app_config)
    }
}

/// Apply command-line overrides on top of the loaded configuration.
fn apply_overrides(cli: &Cli, config: &mut AppConfig) {
    if let Some(columns) = cli.columns {
        config.game.columns = columns;
    }
    if let Some(rows) = cli.rows {
        config.game.rows = rows;
    }
    if let Some(depth) = cli.depth {
        config.opponent.lookahead_depth = depth;
    }
    if let Some(opponent_starts) = cli.opponent_starts {
        config.game.opponent_starts = opponent_starts;
    }
    if let Some(extend) = cli.extend_turn {
        config.game.extend_turn_on_score = extend;
    }
}

fn run_headless(config: &AppConfig, games: usize, seed: u64, json: bool) -> Result<()> {
    let (records, metrics) = play_match(config, games, seed).context("playing headless match")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).context("serializing game records")?
        );
        return Ok(());
    }

    for (idx, record) in records.iter().enumerate() {
        println!(
            "Game {:>3} | Random {:>2} - {:>2} Averaging | {} moves | opponent {:.1} ms",
            idx + 1,
            record.player_score,
            record.opponent_score,
            record.moves.len(),
            record.opponent_ms,
        );
    }
    println!(
        "{}x{} depth {}: opponent won {}/{} ({:.0}%), drew {}, avg margin {:+.2}, avg opponent time {:.1} ms",
        config.game.columns,
        config.game.rows,
        config.opponent.lookahead_depth,
        metrics.opponent_wins(),
        metrics.total_games(),
        metrics.opponent_win_rate(games) * 100.0,
        metrics.draws(),
        metrics.average_margin(games),
        metrics.average_opponent_ms(games),
    );
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    let mut app = App::new(config).context("starting game")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res.context("running terminal UI")
}
