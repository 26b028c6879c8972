use std::collections::HashSet;

use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::grid::{Cell, Grid};

/// Random draws tried before falling back to scanning for free cells.
const SAMPLE_ATTEMPTS: usize = 64;

/// Picks food positions away from the snake.
pub struct FoodSpawner {
    rng: StdRng,
    seed: u64,
}

impl FoodSpawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Chooses a free cell, keeping a one tile margin from the walls when the
    /// interior has room. Returns `None` only when every cell is occupied.
    pub fn place(&mut self, grid: &Grid, occupied: &HashSet<Cell>) -> Option<Cell> {
        let (tiles_x, tiles_y) = (grid.tiles_x() as i32, grid.tiles_y() as i32);
        for _ in 0..SAMPLE_ATTEMPTS {
            let cell = Cell::new(
                self.rng.gen_range(1..tiles_x - 1),
                self.rng.gen_range(1..tiles_y - 1),
            );
            if !occupied.contains(&cell) {
                return Some(cell);
            }
        }

        debug!("random food sampling missed, scanning for free cells");
        let free = |cell: &Cell| !occupied.contains(cell);
        if let Some(cell) = grid.interior_cells().filter(free).choose(&mut self.rng) {
            return Some(cell);
        }
        grid.cells().filter(free).choose(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_off_the_border() {
        let grid = Grid::from_area(10, 6, 1).unwrap();
        let mut spawner = FoodSpawner::new(7);
        for _ in 0..200 {
            let cell = spawner.place(&grid, &HashSet::new()).unwrap();
            assert!((1..9).contains(&cell.x), "{cell:?}");
            assert!((1..5).contains(&cell.y), "{cell:?}");
        }
    }

    #[test]
    fn avoids_occupied_cells() {
        let grid = Grid::from_area(5, 5, 1).unwrap();
        let mut occupied: HashSet<Cell> = grid.interior_cells().collect();
        let free = Cell::new(2, 2);
        occupied.remove(&free);
        let mut spawner = FoodSpawner::new(1);
        for _ in 0..20 {
            assert_eq!(spawner.place(&grid, &occupied), Some(free));
        }
    }

    #[test]
    fn falls_back_to_the_border_when_interior_is_full() {
        let grid = Grid::from_area(3, 3, 1).unwrap();
        let occupied: HashSet<Cell> = grid.cells().filter(|&c| c != Cell::new(0, 2)).collect();
        let mut spawner = FoodSpawner::new(3);
        assert_eq!(spawner.place(&grid, &occupied), Some(Cell::new(0, 2)));
    }

    #[test]
    fn full_grid_is_exhausted() {
        let grid = Grid::from_area(3, 3, 1).unwrap();
        let occupied: HashSet<Cell> = grid.cells().collect();
        assert_eq!(FoodSpawner::new(0).place(&grid, &occupied), None);
    }

    #[test]
    fn same_seed_same_food() {
        let grid = Grid::from_area(40, 20, 1).unwrap();
        let mut a = FoodSpawner::new(42);
        let mut b = FoodSpawner::new(42);
        for _ in 0..10 {
            assert_eq!(a.place(&grid, &HashSet::new()), b.place(&grid, &HashSet::new()));
        }
    }
}
