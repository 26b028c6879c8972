use crate::error::ConfigError;

/// Smallest grid side, in tiles, a game can be played on.
pub const MIN_TILES: u32 = 3;

/// Largest grid side, in tiles. Keeps cell coordinates inside `i32` and
/// terminal rows inside `u16`.
pub const MAX_TILES: u32 = 10_000;

/// A grid position. Signed so a head that left the board can still be
/// represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// The playable coordinate space, `[0, tiles_x) x [0, tiles_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    tiles_x: u32,
    tiles_y: u32,
    cell_size: u32,
}

impl Grid {
    /// Derives the grid from a pixel area and a cell size.
    ///
    /// Partial cells at the right and bottom edges are dropped. Fails when
    /// `cell_size` is zero or either axis falls outside
    /// [`MIN_TILES`]..=[`MAX_TILES`].
    pub fn from_area(width: u32, height: u32, cell_size: u32) -> Result<Self, ConfigError> {
        if cell_size == 0 {
            return Err(ConfigError::CellSizeZero);
        }
        let tiles_x = width / cell_size;
        let tiles_y = height / cell_size;
        if tiles_x < MIN_TILES || tiles_y < MIN_TILES {
            return Err(ConfigError::AreaTooSmall { tiles_x, tiles_y });
        }
        if tiles_x > MAX_TILES || tiles_y > MAX_TILES {
            return Err(ConfigError::AreaTooLarge { tiles_x, tiles_y });
        }
        Ok(Self {
            tiles_x,
            tiles_y,
            cell_size,
        })
    }

    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as u32) < self.tiles_x && (cell.y as u32) < self.tiles_y
    }

    pub fn center(&self) -> Cell {
        Cell::new((self.tiles_x / 2) as i32, (self.tiles_y / 2) as i32)
    }

    /// Every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let (tiles_x, tiles_y) = (self.tiles_x as i32, self.tiles_y as i32);
        (0..tiles_y).flat_map(move |y| (0..tiles_x).map(move |x| Cell::new(x, y)))
    }

    /// Cells at least one tile away from every edge.
    pub fn interior_cells(&self) -> impl Iterator<Item = Cell> {
        let (tiles_x, tiles_y) = (self.tiles_x as i32, self.tiles_y as i32);
        (1..tiles_y - 1).flat_map(move |y| (1..tiles_x - 1).map(move |x| Cell::new(x, y)))
    }
}
