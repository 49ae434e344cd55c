mod apple;
mod board;
mod config;
mod engine;
mod error;
mod game;
mod input;
mod snake;
mod term;

use std::{fs::File, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use config::Cli;

pub type TermInt = u16;
pub type Coords = (u16, u16);

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path, &cli.log_level)?;
    }

    let config = cli.to_config().context("Invalid configuration")?;
    tracing::info!(?config, "configuration loaded");

    let mut game = game::SnakeGame::new(config)?;
    let (state, score) = game.run()?;

    println!("{:?}, score: {}", state, score);
    Ok(())
}

/// The terminal is taken over by the game, so logs only ever go to a file.
fn init_logging(path: &Path, level: &str) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
