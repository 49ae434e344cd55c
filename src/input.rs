use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crossterm::event::{read, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::{debug, error};

use crate::board::Point;
use crate::error::InputError;
use crate::snake::Direction;

/// Commands delivered by the keyboard to the tick loop.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Move {
    Up,
    Right,
    Down,
    Left,
    Quit,
    None,
}

impl Move {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Move::Up => Some(Direction::Up),
            Move::Right => Some(Direction::Right),
            Move::Down => Some(Direction::Down),
            Move::Left => Some(Direction::Left),
            Move::Quit | Move::None => None,
        }
    }
}

impl From<Direction> for Move {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Move::Up,
            Direction::Right => Move::Right,
            Direction::Down => Move::Down,
            Direction::Left => Move::Left,
        }
    }
}

pub struct InputValidator;

impl InputValidator {
    /// A direction is refused only when it would put the head straight back
    /// onto the neck. Walls and the rest of the body are judged after the move.
    pub fn is_valid_direction(proposed: Move, head: Point, neck: Option<Point>) -> bool {
        match (proposed.direction(), neck) {
            (Some(dir), Some(neck)) => dir.step(head) != neck,
            _ => true,
        }
    }
}

pub fn decode_key(key: &KeyEvent) -> Move {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Move::Quit;
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Move::Up,
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Move::Left,
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Move::Down,
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Move::Right,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Move::Quit,
        _ => Move::None,
    }
}

/// Decodes a terminal event; anything that is not a key press yields nothing.
pub fn decode_event(event: &Event) -> Option<Move> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(decode_key(key)),
        _ => None,
    }
}

/// Blocks on terminal events in a background thread and forwards decoded
/// moves. A read failure is sent once and ends the thread.
pub fn spawn_capture(tx: Sender<Result<Move, InputError>>) -> JoinHandle<()> {
    thread::spawn(move || loop {
        match read() {
            Ok(event) => {
                if let Some(mov) = decode_event(&event) {
                    if tx.send(Ok(mov)).is_err() {
                        debug!("input receiver dropped, stopping capture");
                        return;
                    }
                }
            }
            Err(e) => {
                error!(error = %e, "key capture failed");
                let _ = tx.send(Err(InputError::Capture(e)));
                return;
            }
        }
    })
}

/// Turns kept for later ticks when keys come faster than the snake moves.
pub const MAX_QUEUED_TURNS: usize = 2;

/// Commands waiting for a tick. Each tick takes one direction, oldest first,
/// so a quick double turn is not lost. A quit overrides everything queued.
#[derive(Debug, Default)]
pub struct CommandQueue {
    turns: VecDeque<Move>,
    quit: bool,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend<I: IntoIterator<Item = Move>>(&mut self, moves: I) {
        for mov in moves {
            match mov {
                Move::Quit => self.quit = true,
                Move::None => {}
                dir if self.turns.back() == Some(&dir) => {}
                dir => {
                    self.turns.push_back(dir);
                    if self.turns.len() > MAX_QUEUED_TURNS {
                        self.turns.pop_front();
                    }
                }
            }
        }
    }

    /// The command for this tick, `Move::None` when nothing is queued.
    pub fn next_command(&mut self) -> Move {
        if self.quit {
            self.turns.clear();
            return Move::Quit;
        }
        self.turns.pop_front().unwrap_or(Move::None)
    }

    /// Non-blocking: takes whatever the capture thread sent since the last
    /// tick, then hands out one command.
    pub fn poll(&mut self, rx: &Receiver<Result<Move, InputError>>) -> Result<Move, InputError> {
        loop {
            match rx.try_recv() {
                Ok(res) => self.extend([res?]),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(InputError::Disconnected),
            }
        }

        Ok(self.next_command())
    }
}

/// Blocks until the next command arrives.
pub fn wait_command(rx: &Receiver<Result<Move, InputError>>) -> Result<Move, InputError> {
    rx.recv().map_err(|_| InputError::Disconnected)?
}
