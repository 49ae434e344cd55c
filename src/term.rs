use crate::{TermInt, Coords};
use crate::board::{Board, Point};
use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::style::{Color, Stylize};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};

/// One terminal character cell as the game sees it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Wall,
    Floor,
    Snake,
    Apple,
    Text(char),
}

impl Cell {
    fn styled(self) -> style::StyledContent<char> {
        match self {
            Cell::Blank => ' '.stylize(),
            Cell::Wall => ' '.on(Color::DarkRed),
            Cell::Floor => ' '.on(Color::DarkCyan),
            Cell::Snake => ' '.on(Color::Black),
            Cell::Apple => ' '.on(Color::DarkGrey),
            Cell::Text(ch) => ch.with(Color::Black).on(Color::Green),
        }
    }
}

/// What the renderer needs from the engine for one frame.
pub struct Frame<'a> {
    pub board: &'a Board,
    pub body: &'a [Point],
    pub apple: Option<Point>,
    pub score: u32,
}

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
    screen: Vec<Cell>,
}

impl TermManager {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let stdout = stdout();
        let screen = vec![Cell::Blank; width as usize * height as usize];
        Ok(TermManager { width, height, stdout, screen })
    }

    pub fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Redraws only the cells that differ from the previous frame.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let next = compose(self.width, self.height, frame);

        for (i, cell) in next.iter().enumerate() {
            if self.screen[i] != *cell {
                let pos = ((i % self.width as usize) as TermInt, (i / self.width as usize) as TermInt);
                self.print_at(pos, *cell)?;
            }
        }

        self.flush()
    }

    /// Draws a centered box over the board. The screen buffer keeps the
    /// game underneath it.
    pub fn show_message(&mut self, lines: &[&str]) -> io::Result<()> {
        for (pos, cell) in message_cells(self.width, self.height, lines) {
            self.print_at_no_save(pos, cell)?;
        }

        self.flush()
    }

    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))?;
        self.screen = vec![Cell::Blank; self.width as usize * self.height as usize];
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }

    ///////////////////////////////////////////////////////////////////////////

    fn print_at(&mut self, pos: Coords, cell: Cell) -> io::Result<()> {
        self.print_at_no_save(pos, cell)?;
        let idx = self.width as usize * pos.1 as usize + pos.0 as usize;
        self.screen[idx] = cell;
        Ok(())
    }

    fn print_at_no_save(&mut self, pos: Coords, cell: Cell) -> io::Result<()> {
        if pos.0 >= self.width || pos.1 >= self.height {
            return Ok(());
        }
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::PrintStyledContent(cell.styled()))
    }
}

/// Lays out a full `width` x `height` frame, row-major.
pub fn compose(width: TermInt, height: TermInt, frame: &Frame) -> Vec<Cell> {
    let (w, h) = (width as i32, height as i32);
    let mut cells = vec![Cell::Blank; w as usize * h as usize];
    let mut put = |p: Point, cell: Cell| {
        if (0..w).contains(&p.x) && (0..h).contains(&p.y) {
            cells[(p.y * w + p.x) as usize] = cell;
        }
    };

    let board = frame.board;
    for y in board.y_range() {
        for x in board.x_range() {
            let cell = if board.is_wall(x, y) { Cell::Wall } else { Cell::Floor };
            put(Point::new(x, y), cell);
        }
    }

    if let Some(apple) = frame.apple.filter(|p| board.contains(*p)) {
        put(apple, Cell::Apple);
    }

    // A freshly grown segment sits off the board until the next step
    for segment in frame.body.iter().filter(|p| board.contains(**p)) {
        put(*segment, Cell::Snake);
    }

    let score = format!("Score: {}", frame.score);
    let y = board.y_range().end;
    for (i, ch) in score.chars().enumerate() {
        put(Point::new(board.x_range().start + i as i32, y), Cell::Text(ch));
    }

    cells
}

/// Text cells of a box centered in a `width` x `height` terminal, with one
/// blank line above and below `lines`.
pub fn message_cells(width: TermInt, height: TermInt, lines: &[&str]) -> Vec<(Coords, Cell)> {
    let msg_height = (lines.len() + 2) as TermInt;
    let msg_width = (lines.iter().map(|x| x.chars().count()).max().unwrap_or(0) + 2) as TermInt;
    let top_left = (
        (width / 2).saturating_sub(msg_width / 2),
        (height / 2).saturating_sub(msg_height / 2),
    );

    let mut cells = vec![];
    for y in [top_left.1, top_left.1 + msg_height - 1] {
        for x_diff in 0..msg_width {
            cells.push(((top_left.0 + x_diff, y), Cell::Text(' ')));
        }
    }

    for (i, line) in lines.iter().enumerate() {
        let padded_line = format!("{line: ^width$}", line = line, width = msg_width as usize);
        let y = top_left.1 + i as TermInt + 1;
        for (x_diff, ch) in padded_line.chars().enumerate() {
            cells.push(((top_left.0 + x_diff as TermInt, y), Cell::Text(ch)));
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_frame() {
        let board = Board::with_bounds(12, 10, 0, 12, 0, 8).unwrap();
        let body = [Point::new(5, 3), Point::new(4, 3), Point::OFF_BOARD];
        let frame = Frame { board: &board, body: &body, apple: Some(Point::new(8, 5)), score: 3 };

        let cells = compose(12, 10, &frame);
        let at = |x: usize, y: usize| cells[y * 12 + x];

        assert_eq!(at(0, 0), Cell::Wall);
        assert_eq!(at(11, 7), Cell::Wall);
        assert_eq!(at(1, 1), Cell::Floor);
        assert_eq!(at(5, 3), Cell::Snake);
        assert_eq!(at(4, 3), Cell::Snake);
        assert_eq!(at(8, 5), Cell::Apple);
        assert_eq!(at(0, 8), Cell::Text('S'));
        assert_eq!(at(7, 8), Cell::Text('3'));
        assert_eq!(at(0, 9), Cell::Blank);
    }

    #[test]
    fn test_compose_skips_cells_outside_board() {
        let board = Board::with_bounds(20, 12, 4, 16, 1, 9).unwrap();
        let body = [Point::new(6, 4), Point::new(2, 4)];
        let frame = Frame { board: &board, body: &body, apple: Some(Point::new(18, 4)), score: 0 };

        let cells = compose(20, 12, &frame);
        let at = |x: usize, y: usize| cells[y * 20 + x];

        assert_eq!(at(6, 4), Cell::Snake);
        assert_eq!(at(2, 4), Cell::Blank);
        assert_eq!(at(18, 4), Cell::Blank);
        assert!(!cells.contains(&Cell::Apple));
    }

    #[test]
    fn test_message_box_is_centered() {
        let cells = message_cells(40, 20, &["You won!", "Score: 12"]);

        // 9 chars + 2 padding wide, 2 lines + 2 blank rows high
        assert_eq!(cells.len(), 11 * 4);
        let top_left = cells.iter().map(|(pos, _)| *pos).min().unwrap();
        assert_eq!(top_left, (15, 8));

        let row: String = cells
            .iter()
            .filter(|((_, y), _)| *y == 9)
            .map(|(_, cell)| match cell {
                Cell::Text(ch) => *ch,
                _ => '?',
            })
            .collect();
        assert_eq!(row.trim(), "You won!");
        assert!(cells.iter().all(|(_, cell)| matches!(cell, Cell::Text(_))));
    }
}
