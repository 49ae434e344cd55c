use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::board::Point;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn step(self, from: Point) -> Point {
        let (dx, dy) = self.delta();
        Point::new(from.x + dx, from.y + dy)
    }
}

/// What a single step did to the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Some trailing segment stood on the new head position before it moved.
    pub self_collision: bool,
    /// Where the last segment was before the step.
    pub vacated: Point,
}

/// Ordered segments, head at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnakeBody {
    segments: Vec<Point>,
}

impl SnakeBody {
    /// Lays out `length` segments starting at `head`, trailing away from
    /// `direction`.
    pub fn new(head: Point, length: usize, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        let segments = (0..length.max(1) as i32)
            .map(|i| Point::new(head.x - dx * i, head.y - dy * i))
            .collect();

        Self::from_segments(segments)
    }

    /// Panics on an empty segment list; a body always has a head.
    pub fn from_segments(segments: Vec<Point>) -> Self {
        assert!(!segments.is_empty(), "snake body needs at least a head");
        SnakeBody { segments }
    }

    pub fn segments(&self) -> &[Point] {
        &self.segments
    }

    pub fn head(&self) -> Point {
        self.segments[0]
    }

    /// Second segment, if the body is longer than its head.
    pub fn neck(&self) -> Option<Point> {
        self.segments.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Moves the head one cell and drags every other segment onto the cell
    /// its predecessor held before this step.
    pub fn move_head(&mut self, direction: Direction) -> MoveOutcome {
        let mut previous = self.segments[0];
        let head = direction.step(previous);
        self.segments[0] = head;

        let mut self_collision = false;
        for segment in self.segments.iter_mut().skip(1) {
            if *segment == head {
                self_collision = true;
            }
            previous = std::mem::replace(segment, previous);
        }

        MoveOutcome { self_collision, vacated: previous }
    }

    /// The new tail segment stays off the board until the next step places it.
    pub fn grow(&mut self) {
        self.segments.push(Point::OFF_BOARD);
    }

    pub fn occupied_cells(&self) -> HashSet<Point> {
        self.segments.iter().copied().filter(|p| *p != Point::OFF_BOARD).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(points: &[(i32, i32)]) -> SnakeBody {
        SnakeBody::from_segments(points.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[test]
    fn test_new_trails_behind_head() {
        let snake = SnakeBody::new(Point::new(20, 10), 3, Left);
        assert_eq!(snake.segments(), body(&[(20, 10), (21, 10), (22, 10)]).segments());

        let snake = SnakeBody::new(Point::new(5, 3), 3, Right);
        assert_eq!(snake.segments(), body(&[(5, 3), (4, 3), (3, 3)]).segments());
    }

    #[test]
    fn test_follow_the_leader() {
        let mut snake = body(&[(5, 3), (4, 3), (3, 3)]);
        let before = snake.segments().to_vec();

        let outcome = snake.move_head(Right);

        assert!(!outcome.self_collision);
        assert_eq!(outcome.vacated, Point::new(3, 3));
        assert_eq!(snake.head(), Point::new(6, 3));
        for i in 1..snake.len() {
            assert_eq!(snake.segments()[i], before[i - 1]);
        }
    }

    #[test]
    fn test_turn_keeps_chain() {
        let mut snake = body(&[(5, 3), (4, 3), (3, 3), (2, 3)]);
        snake.move_head(Down);
        assert_eq!(snake.segments(), body(&[(5, 4), (5, 3), (4, 3), (3, 3)]).segments());
    }

    #[test]
    fn test_self_collision() {
        // Head turns back into a loop: (5,5) -> (5,4) is the fourth segment.
        let mut snake = body(&[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)]);
        let outcome = snake.move_head(Up);
        assert!(outcome.self_collision);
    }

    #[test]
    fn test_moving_onto_old_tail_counts_as_collision() {
        let mut snake = body(&[(5, 5), (6, 5), (6, 4), (5, 4)]);
        assert!(snake.move_head(Up).self_collision);
    }

    #[test]
    fn test_grow_places_segment_on_next_move() {
        let mut snake = body(&[(5, 3), (4, 3), (3, 3)]);
        snake.grow();

        assert_eq!(snake.len(), 4);
        assert_eq!(snake.occupied_cells().len(), 3);

        let outcome = snake.move_head(Right);
        assert!(!outcome.self_collision);
        assert_eq!(outcome.vacated, Point::OFF_BOARD);
        assert_eq!(snake.segments(), body(&[(6, 3), (5, 3), (4, 3), (3, 3)]).segments());
        assert_eq!(snake.occupied_cells().len(), 4);
    }

    #[test]
    fn test_single_segment() {
        let mut snake = body(&[(2, 2)]);
        let outcome = snake.move_head(Up);
        assert_eq!(snake.head(), Point::new(2, 1));
        assert_eq!(outcome.vacated, Point::new(2, 2));
        assert_eq!(snake.neck(), None);
    }
}
