use std::{fs, path::{Path, PathBuf}, time::Duration};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::snake::Direction;
use crate::TermInt;

/// Settings fixed for the whole process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Width of the walled rectangle, walls included
    pub board_width: TermInt,
    /// Height of the walled rectangle, walls included
    pub board_height: TermInt,
    /// Milliseconds between two game steps
    pub tick_interval_ms: u64,
    /// Direction the snake starts moving in
    pub initial_direction: Direction,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            board_width: 40,
            board_height: 20,
            tick_interval_ms: 120,
            initial_direction: Direction::Left,
        }
    }
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(self)
    }
}

#[derive(Debug, Parser)]
#[command(name = "snake")]
#[command(version, about = "Snake in the terminal")]
pub struct Cli {
    /// Board width, walls included
    #[arg(long)]
    pub width: Option<TermInt>,

    /// Board height, walls included
    #[arg(long)]
    pub height: Option<TermInt>,

    /// Milliseconds per game step
    #[arg(long = "tick-ms")]
    pub tick_ms: Option<u64>,

    /// JSON file with default settings; flags override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. "info" or "snake=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(w) = self.width {
            config.board_width = w;
        }
        if let Some(h) = self.height {
            config.board_height = h;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_interval_ms = ms;
        }

        config.validate()
    }
}
