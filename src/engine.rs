use std::collections::HashSet;

use rand::Rng;
use tracing::{debug, info};

use crate::apple::AppleSpawner;
use crate::board::{Board, Point};
use crate::input::{InputValidator, Move};
use crate::snake::{Direction, SnakeBody};

pub const INITIAL_SNAKE_LENGTH: usize = 3;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameState {
    Pending,
    BorderFinish,
    SnakeFinish,
    QuitByUser,
    /// No floor cell left for an apple.
    Won,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Pending
    }
}

/// What happened during one call to [`Game::tick`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickEvent {
    Moved,
    AteApple,
    Quit,
    HitWall,
    HitSelf,
    Won,
    /// The game was already over; nothing changed.
    Finished,
}

pub struct Game<R: Rng> {
    board: Board,
    snake: SnakeBody,
    direction: Direction,
    apple: Option<Point>,
    state: GameState,
    score: u32,
    spawner: AppleSpawner<R>,
}

impl<R: Rng> Game<R> {
    /// Seeds a three-segment snake at the middle of the board and places
    /// the first apple.
    pub fn new(board: Board, direction: Direction, spawner: AppleSpawner<R>) -> Self {
        let snake = SnakeBody::new(board.middle(), INITIAL_SNAKE_LENGTH, direction);
        Self::with_body(board, snake, direction, spawner)
    }

    pub fn with_body(board: Board, snake: SnakeBody, direction: Direction, spawner: AppleSpawner<R>) -> Self {
        let mut game = Game {
            board,
            snake,
            direction,
            apple: None,
            state: GameState::Pending,
            score: 0,
            spawner,
        };
        info!(head = ?game.snake.head(), "game started");
        if !game.respawn_apple(&HashSet::new()) {
            game.finish(GameState::Won);
        }
        game
    }

    /// Advances the game by one step using at most one command.
    pub fn tick(&mut self, command: Move) -> TickEvent {
        if self.state.is_terminal() {
            return TickEvent::Finished;
        }

        if command == Move::Quit {
            self.finish(GameState::QuitByUser);
            return TickEvent::Quit;
        }

        if let Some(dir) = command.direction() {
            if InputValidator::is_valid_direction(command, self.snake.head(), self.snake.neck()) {
                self.direction = dir;
            } else {
                debug!(?dir, current = ?self.direction, "ignoring reversal");
            }
        }

        let outcome = self.snake.move_head(self.direction);
        let head = self.snake.head();

        if outcome.self_collision {
            self.finish(GameState::SnakeFinish);
            return TickEvent::HitSelf;
        }

        let mut event = TickEvent::Moved;

        if self.apple == Some(head) {
            self.snake.grow();
            self.score += 1;
            info!(score = self.score, length = self.snake.len(), "apple eaten");

            // Counting the cell the tail just left makes a full board mean the
            // snake is as long as the floor.
            let reserved: HashSet<Point> = [outcome.vacated].into_iter().collect();
            if self.respawn_apple(&reserved) {
                event = TickEvent::AteApple;
            } else {
                self.finish(GameState::Won);
                return TickEvent::Won;
            }
        }

        if self.board.is_wall(head.x, head.y) {
            self.finish(GameState::BorderFinish);
            return TickEvent::HitWall;
        }

        event
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn body(&self) -> &[Point] {
        self.snake.segments()
    }

    pub fn apple(&self) -> Option<Point> {
        self.apple
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn respawn_apple(&mut self, reserved: &HashSet<Point>) -> bool {
        let mut occupied = self.snake.occupied_cells();
        occupied.extend(reserved.iter().copied());

        self.apple = self.spawner.spawn(&self.board, &occupied);
        if self.apple.is_none() {
            info!(score = self.score, "board is full");
        }
        self.apple.is_some()
    }

    fn finish(&mut self, state: GameState) {
        info!(?state, score = self.score, "game over");
        self.state = state;
    }
}
