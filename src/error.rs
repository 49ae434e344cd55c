use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("board {width}x{height} is too small, need at least {min_width}x{min_height}")]
    TooSmall { width: i32, height: i32, min_width: i32, min_height: i32 },

    #[error("board {board_width}x{board_height} does not fit in a {term_width}x{term_height} terminal")]
    DoesNotFit { board_width: i32, board_height: i32, term_width: i32, term_height: i32 },

    #[error("invalid board bounds x {x_start}..{x_end}, y {y_start}..{y_end}")]
    InvalidBounds { x_start: i32, x_end: i32, y_start: i32, y_end: i32 },
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("key capture went wrong: {0}")]
    Capture(#[source] io::Error),

    #[error("input capture thread is gone")]
    Disconnected,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot parse config file {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("tick interval must be greater than zero")]
    ZeroTick,
}
