use crate::clock::Difficulty;
use crate::error::ConfigError;
use crate::grid::Grid;

/// Session start parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Drawing surface width in pixels.
    pub width: u32,
    /// Drawing surface height in pixels, info bar included.
    pub height: u32,
    /// Pixels reserved under the field for the info bar.
    pub hud_height: u32,
    pub cell_size: u32,
    pub difficulty: Difficulty,
    /// Fixes food placement. Random when unset.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 440,
            hud_height: 40,
            cell_size: 20,
            difficulty: Difficulty::Normal,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn playable_height(&self) -> u32 {
        self.height.saturating_sub(self.hud_height)
    }

    /// Validates the area and derives the grid from it.
    pub fn grid(&self) -> Result<Grid, ConfigError> {
        Grid::from_area(self.width, self.playable_height(), self.cell_size)
    }
}
