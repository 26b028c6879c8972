//! What the engine hands to whoever draws it.

use anyhow::Result;

use crate::clock::Difficulty;
use crate::engine::{EndReason, GameState};
use crate::grid::Cell;

/// Read-only view of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Head first.
    pub snake: Vec<Cell>,
    pub food: Option<Cell>,
    pub tiles_x: u32,
    pub tiles_y: u32,
    pub cell_size: u32,
    pub hud: Hud,
}

/// Values for the info bar and the menu, pause and game over overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub state: GameState,
    pub score: u32,
    pub level: u32,
    pub high_score: u32,
    pub difficulty: Difficulty,
    pub end_reason: Option<EndReason>,
}

/// Draws snapshots. Called every frame, not only on ticks.
pub trait Renderer {
    fn draw(&mut self, snapshot: &Snapshot) -> Result<()>;
}

/// Discards every frame. Lets the engine run headless.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }
}
