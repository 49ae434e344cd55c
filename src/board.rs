use crate::error::BoardError;
use crate::TermInt;

pub const MIN_BOARD_WIDTH: i32 = 8;
pub const MIN_BOARD_HEIGHT: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Position of a segment that has not been placed on the board yet.
    pub const OFF_BOARD: Point = Point { x: -1, y: -1 };

    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Playable rectangle inside the terminal. The outermost ring of the
/// rectangle is wall, everything inside it is floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    x_start: i32,
    x_end: i32,
    y_start: i32,
    y_end: i32,
    middle: Point,
}

impl Board {
    /// Centers a `board_width` x `board_height` rectangle in the terminal,
    /// leaving one line below it for the score.
    pub fn centered(
        term_width: TermInt,
        term_height: TermInt,
        board_width: TermInt,
        board_height: TermInt,
    ) -> Result<Self, BoardError> {
        let (width, height) = (term_width as i32, term_height as i32);
        let (bw, bh) = (board_width as i32, board_height as i32);

        if bw < MIN_BOARD_WIDTH || bh < MIN_BOARD_HEIGHT {
            return Err(BoardError::TooSmall {
                width: bw,
                height: bh,
                min_width: MIN_BOARD_WIDTH,
                min_height: MIN_BOARD_HEIGHT,
            });
        }

        let middle = Point::new(width / 2, height / 2);
        let x_start = middle.x - bw / 2;
        let y_start = middle.y - bh / 2;
        let (x_end, y_end) = (x_start + bw, y_start + bh);

        if x_start < 0 || y_start < 0 || x_end > width || y_end >= height {
            return Err(BoardError::DoesNotFit {
                board_width: bw,
                board_height: bh,
                term_width: width,
                term_height: height,
            });
        }

        // The rectangle's center is the terminal middle again
        Self::with_bounds(width, height, x_start, x_end, y_start, y_end)
    }

    /// Explicit geometry. The walls need at least one floor cell between them.
    pub fn with_bounds(
        width: i32,
        height: i32,
        x_start: i32,
        x_end: i32,
        y_start: i32,
        y_end: i32,
    ) -> Result<Self, BoardError> {
        let valid = 0 <= x_start
            && x_start + 2 < x_end
            && x_end <= width
            && 0 <= y_start
            && y_start + 2 < y_end
            && y_end <= height;

        if !valid {
            return Err(BoardError::InvalidBounds { x_start, x_end, y_start, y_end });
        }

        let middle = Point::new((x_start + x_end) / 2, (y_start + y_end) / 2);
        Ok(Board { width, height, x_start, x_end, y_start, y_end, middle })
    }

    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        y == self.y_start || y == self.y_end - 1 || x == self.x_start || x == self.x_end - 1
    }

    /// Inside the walled rectangle, walls included.
    pub fn contains(&self, p: Point) -> bool {
        self.x_range().contains(&p.x) && self.y_range().contains(&p.y)
    }

    /// All floor cells, row by row.
    pub fn interior(&self) -> impl Iterator<Item = Point> + '_ {
        (self.y_start + 1..self.y_end - 1)
            .flat_map(move |y| (self.x_start + 1..self.x_end - 1).map(move |x| Point::new(x, y)))
    }

    pub fn interior_size(&self) -> usize {
        ((self.x_end - self.x_start - 2) * (self.y_end - self.y_start - 2)) as usize
    }

    pub fn middle(&self) -> Point {
        self.middle
    }

    /// Terminal dimensions the board was laid out in.
    pub fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn x_range(&self) -> std::ops::Range<i32> {
        self.x_start..self.x_end
    }

    pub fn y_range(&self) -> std::ops::Range<i32> {
        self.y_start..self.y_end
    }
}
