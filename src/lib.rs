//! Snake from a portfolio site: a headless engine with pluggable drawing,
//! input and high score storage, plus a terminal front end.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod food;
pub mod grid;
pub mod input;
pub mod render;
pub mod runner;
pub mod snake;
pub mod store;
pub mod terminal;

pub use clock::{Difficulty, GameClock};
pub use config::GameConfig;
pub use engine::{Action, EndReason, GameEngine, GameState, TickOutcome};
pub use error::{ConfigError, StoreError};
pub use grid::{Cell, Direction, Grid};
pub use input::{Input, InputSource};
pub use render::{NullRenderer, Renderer, Snapshot};
pub use runner::Runner;
pub use snake::Snake;
pub use store::{FileStore, HighScoreStore, MemoryStore};
