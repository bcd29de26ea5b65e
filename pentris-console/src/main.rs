use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use pentris_lib::{common::Timer, config::GameConfig, game::run_game, pieces::PieceSet};

mod control;
mod display;

use control::{enable_raw_mode, restore_terminal, ConsoleController};
use display::ConsoleDisplay;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pieces {
    /// The twelve free pentominoes
    Classic,
    /// Classic plus mirrored variants of the asymmetric pieces
    Extended,
}

impl From<Pieces> for PieceSet {
    fn from(pieces: Pieces) -> Self {
        match pieces {
            Pieces::Classic => PieceSet::Classic,
            Pieces::Extended => PieceSet::Extended,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pentris")]
#[command(about = "Falling pentominoes in the terminal")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Pieces::Classic)]
    pieces: Pieces,
    /// Seed for piece and color selection (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,
    #[arg(long, default_value_t = pentris_lib::config::DEFAULT_FRAME_MILLIS)]
    frame_ms: u64,
}

// Console timer implementation
pub struct ConsoleTimer {
    started: Instant,
}

impl Timer for ConsoleTimer {
    async fn sleep_millis(&self, millis: u64) {
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    fn now_millis(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

fn clock_seed() -> Result<u32> {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the unix epoch")?;
    Ok(since_epoch.as_millis() as u32)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = GameConfig {
        pieces: cli.pieces.into(),
        frame_millis: cli.frame_ms,
    };
    config.validate().context("invalid game configuration")?;
    let seed = match cli.seed {
        Some(seed) => seed,
        None => clock_seed()?,
    };
    info!(
        "starting with {} pieces, seed {}, {} ms frames",
        config.pieces.name(),
        seed,
        config.frame_millis
    );

    enable_raw_mode();

    // Set up Ctrl+C handler to restore terminal
    ctrlc::set_handler(move || {
        restore_terminal();
        println!("\nTerminal restored. Goodbye!");
        std::process::exit(0);
    })?;

    let mut display = ConsoleDisplay::new();
    let mut controller = ConsoleController::new();
    let timer = ConsoleTimer {
        started: Instant::now(),
    };

    run_game(&config, &mut display, &mut controller, &timer, || seed).await;

    Ok(())
}
