use std::sync::mpsc::{channel, Receiver};
use std::thread::sleep;
use std::time::Instant;

use anyhow::{Context, Result};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::apple::AppleSpawner;
use crate::board::Board;
use crate::config::Config;
use crate::engine::{Game, GameState};
use crate::error::InputError;
use crate::input::{self, CommandQueue, Move};
use crate::term::{Frame, TermManager};

/// Runs one game in the terminal: a keyboard thread feeds commands, the
/// calling thread steps the engine on a fixed cadence and draws the result.
pub struct SnakeGame {
    config: Config,
    term: TermManager,
}

impl SnakeGame {
    pub fn new(config: Config) -> Result<Self> {
        let term = TermManager::new().context("Failed to read terminal size")?;
        Ok(SnakeGame { config, term })
    }

    /// Returns the final state and score. The terminal is restored on every
    /// path out of here.
    pub fn run(&mut self) -> Result<(GameState, u32)> {
        let (w, h) = self.term.get_terminal_size();
        let board = Board::centered(w, h, self.config.board_width, self.config.board_height)
            .context("Board does not fit the terminal")?;

        if let Err(e) = self.term.setup() {
            let _ = self.term.restore();
            return Err(e).context("Failed to set up terminal");
        }

        let (tx, rx) = channel();
        input::spawn_capture(tx);

        let result = self.play(board, &rx);

        if let Err(e) = self.term.restore() {
            warn!(error = %e, "failed to restore terminal");
        }

        result
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self, board: Board, rx: &Receiver<Result<Move, InputError>>) -> Result<(GameState, u32)> {
        let mut game = Game::new(board, self.config.initial_direction, AppleSpawner::new());
        let tick = self.config.tick_interval();
        info!(
            ?tick,
            terminal = ?game.board().size(),
            floor = game.board().interior_size(),
            direction = ?game.direction(),
            "starting game loop"
        );

        self.term.draw(&frame(&game)).context("Failed to draw frame")?;
        let mut next_tick = Instant::now() + tick;
        let mut commands = CommandQueue::new();

        while !game.is_over() {
            let now = Instant::now();
            if next_tick > now {
                sleep(next_tick - now);
            }
            next_tick = next_tick.max(now) + tick;

            let command = commands.poll(rx).context("Input capture failed")?;
            let event = game.tick(command);
            debug!(?command, ?event, "tick");
            self.term.draw(&frame(&game)).context("Failed to draw frame")?;
        }

        let state = game.state();
        if let Some(s) = farewell(state) {
            self.term
                .show_message(&[s, &format!("Score: {}", game.score()), "", "Press any key to exit"])
                .context("Failed to show message")?;
            input::wait_command(rx).context("Input capture failed")?;
        }

        Ok((state, game.score()))
    }
}

/// Headline of the game-over box. A player who quit leaves right away.
fn farewell(state: GameState) -> Option<&'static str> {
    match state {
        GameState::Won => Some("You won!"),
        GameState::BorderFinish => Some("You hit the wall!"),
        GameState::SnakeFinish => Some("You bit yourself!"),
        GameState::QuitByUser | GameState::Pending => None,
    }
}

fn frame<R: Rng>(game: &Game<R>) -> Frame<'_> {
    Frame { board: game.board(), body: game.body(), apple: game.apple(), score: game.score() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farewell_per_state() {
        assert_eq!(farewell(GameState::Won), Some("You won!"));
        assert_eq!(farewell(GameState::BorderFinish), Some("You hit the wall!"));
        assert_eq!(farewell(GameState::SnakeFinish), Some("You bit yourself!"));
    }

    #[test]
    fn test_quit_skips_game_over_box() {
        assert_eq!(farewell(GameState::QuitByUser), None);
    }
}
