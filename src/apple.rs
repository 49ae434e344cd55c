use std::collections::HashSet;

use rand::{rngs::ThreadRng, seq::IteratorRandom, Rng};

use crate::board::{Board, Point};

/// Picks apple positions uniformly among the free floor cells.
pub struct AppleSpawner<R: Rng = ThreadRng> {
    rng: R,
}

impl AppleSpawner<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for AppleSpawner<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> AppleSpawner<R> {
    pub fn with_rng(rng: R) -> Self {
        AppleSpawner { rng }
    }

    /// `None` when every floor cell is taken.
    pub fn spawn(&mut self, board: &Board, occupied: &HashSet<Point>) -> Option<Point> {
        board
            .interior()
            .filter(|p| !occupied.contains(p))
            .choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board() -> Board {
        Board::with_bounds(12, 9, 0, 12, 0, 8).unwrap()
    }

    #[test]
    fn test_spawn_avoids_walls_and_body() {
        let board = board();
        let occupied: HashSet<Point> = [(5, 3), (4, 3), (3, 3)].iter().map(|&(x, y)| Point::new(x, y)).collect();
        let mut spawner = AppleSpawner::with_rng(StdRng::seed_from_u64(7));

        for _ in 0..200 {
            let apple = spawner.spawn(&board, &occupied).unwrap();
            assert!(!board.is_wall(apple.x, apple.y));
            assert!(board.contains(apple));
            assert!(!occupied.contains(&apple));
        }
    }

    #[test]
    fn test_spawn_last_free_cell() {
        let board = board();
        let free = Point::new(10, 6);
        let occupied: HashSet<Point> = board.interior().filter(|p| *p != free).collect();
        let mut spawner = AppleSpawner::with_rng(StdRng::seed_from_u64(1));

        assert_eq!(spawner.spawn(&board, &occupied), Some(free));
    }

    #[test]
    fn test_spawn_full_board() {
        let board = board();
        let occupied: HashSet<Point> = board.interior().collect();
        let mut spawner = AppleSpawner::with_rng(StdRng::seed_from_u64(1));

        assert_eq!(spawner.spawn(&board, &occupied), None);
    }

    #[test]
    fn test_spawn_reaches_many_cells() {
        let board = board();
        let mut spawner = AppleSpawner::with_rng(StdRng::seed_from_u64(42));
        let seen: HashSet<Point> = (0..2000).filter_map(|_| spawner.spawn(&board, &HashSet::new())).collect();

        assert_eq!(seen.len(), board.interior_size());
    }
}
