mod app;
mod store;
mod theme;

use anyhow::Result;
use app::App;
use clap::Parser;
use crossterm::tty::IsTty;
use lockpick_core::{GameSession, LockFactory, MemoryStatsStore, StatsStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use store::JsonStatsStore;
use theme::Theme;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Pick a lock by finding its binding pin, then matching every pin.
#[derive(Debug, Parser)]
#[command(name = "lockpick", version, about)]
struct Cli {
    /// Where to keep stats (defaults to the local data directory)
    #[arg(long, value_name = "PATH")]
    stats_file: Option<PathBuf>,

    /// Seed for reproducible locks
    #[arg(long)]
    seed: Option<u64>,

    /// Print stats and exit
    #[arg(long)]
    stats: bool,

    /// Play without reading or writing the stats file
    #[arg(long)]
    no_save: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never mix with the game text
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    let theme = if cli.no_color || !stdout.is_tty() {
        Theme::plain()
    } else {
        Theme::default()
    };
    let mut app = App::new(io::stdin().lock(), stdout.lock(), theme);

    if cli.no_save {
        run(&cli, &mut app, MemoryStatsStore::new())
    } else {
        let store = match &cli.stats_file {
            Some(path) => JsonStatsStore::new(path),
            None => JsonStatsStore::at_default_path(),
        };
        info!(path = %store.path().display(), "using stats file");
        run(&cli, &mut app, store)
    }
}

fn run<R, W, S>(cli: &Cli, app: &mut App<R, W>, store: S) -> Result<()>
where
    R: BufRead,
    W: Write,
    S: StatsStore,
{
    if cli.stats {
        app.show_stats(&store.load())?;
        return Ok(());
    }

    app.show_instructions()?;
    let pin_count = app.select_lock()?;

    let mut factory = match cli.seed {
        Some(seed) => LockFactory::with_seed(seed),
        None => LockFactory::new(),
    };
    let mut game = GameSession::new(pin_count, &mut factory, store);
    app.play(&mut game)?;

    Ok(())
}
