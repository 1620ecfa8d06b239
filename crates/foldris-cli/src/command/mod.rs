use std::time::Duration;

use clap::Parser;
use foldris_engine::{PieceSeed, RandomPieceSource, Reducer};

use crate::app::PlayApp;

/// Terminal Tetris driven by a pure event reducer.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Board height in rows
    #[clap(long, default_value_t = 12)]
    rows: usize,
    /// Board width in columns
    #[clap(long, default_value_t = 8)]
    cols: usize,
    /// Gravity interval in milliseconds
    #[clap(long, default_value_t = 1000)]
    tick_ms: u64,
    /// Piece sequence seed (32 hex characters) for reproducible games
    #[clap(long)]
    seed: Option<PieceSeed>,
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    let source = match args.seed {
        Some(seed) => RandomPieceSource::with_seed(seed),
        None => RandomPieceSource::new(),
    };
    let mut reducer = Reducer::new(source);
    let state = reducer.seed_state(args.rows, args.cols)?;

    let mut app = PlayApp::new(reducer, state, Duration::from_millis(args.tick_ms));
    ratatui::run(|terminal| app.run(terminal))?;
    Ok(())
}
