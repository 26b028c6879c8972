use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use log::{debug, info};

use crate::clock::{Difficulty, GameClock};
use crate::config::GameConfig;
use crate::error::ConfigError;
use crate::food::FoodSpawner;
use crate::grid::{Cell, Direction, Grid};
use crate::render::{Hud, Snapshot};
use crate::snake::{Snake, INITIAL_LENGTH};
use crate::store::HighScoreStore;

/// Points needed per level.
pub const SCORE_PER_LEVEL: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// No free cell left for food. The player wins.
    BoardFilled,
}

impl EndReason {
    pub fn is_win(self) -> bool {
        self == EndReason::BoardFilled
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EndReason::WallCollision => "hit the wall",
            EndReason::SelfCollision => "bit itself",
            EndReason::BoardFilled => "filled the board",
        })
    }
}

/// Control requests from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectDifficulty(Difficulty),
    Start,
    Pause,
    Resume,
    TogglePause,
    Restart,
    Close,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing; nothing moved.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

pub fn level_for(score: u32) -> u32 {
    score / SCORE_PER_LEVEL + 1
}

/// Owns the board and the session and steps them forward.
pub struct GameEngine<S> {
    grid: Grid,
    next_grid: Option<Grid>,
    snake: Snake,
    food: Option<Cell>,
    spawner: FoodSpawner,
    clock: GameClock,
    state: GameState,
    difficulty: Difficulty,
    score: u32,
    level: u32,
    high_score: u32,
    pending_direction: Option<Direction>,
    end_reason: Option<EndReason>,
    store: S,
}

impl<S: HighScoreStore> GameEngine<S> {
    /// Validates `config` and loads the stored high score. Starts in the menu.
    pub fn new(config: &GameConfig, mut store: S) -> Result<Self, ConfigError> {
        let grid = config.grid()?;
        let spawner = config.seed.map_or_else(FoodSpawner::from_entropy, FoodSpawner::new);
        let high_score = store.load();
        info!(
            "snake engine ready: {}x{} grid, {} difficulty, high score {high_score}, seed {}",
            grid.tiles_x(),
            grid.tiles_y(),
            config.difficulty,
            spawner.seed()
        );
        Ok(Self {
            grid,
            next_grid: None,
            snake: Self::starting_snake(&grid),
            food: None,
            spawner,
            clock: GameClock::new(config.difficulty),
            state: GameState::Menu,
            difficulty: config.difficulty,
            score: 0,
            level: 1,
            high_score,
            pending_direction: None,
            end_reason: None,
            store,
        })
    }

    fn starting_snake(grid: &Grid) -> Snake {
        let center = grid.center();
        let head = Cell::new(center.x.max(INITIAL_LENGTH as i32 - 1), center.y);
        Snake::new(head, INITIAL_LENGTH)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Cell> {
        self.food
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies a control action. Returns `false`, changing nothing, when the
    /// current state does not allow it.
    pub fn apply(&mut self, action: Action) -> bool {
        let applied = match action {
            Action::SelectDifficulty(difficulty) => self.select_difficulty(difficulty),
            Action::Start => self.start(),
            Action::Pause => self.pause(),
            Action::Resume => self.resume(),
            Action::TogglePause => self.pause() || self.resume(),
            Action::Restart => self.restart(),
            Action::Close => self.close(),
        };
        if !applied {
            debug!("ignored {action:?} while {:?}", self.state);
        }
        applied
    }

    /// Difficulty can only change in the menu; a running session keeps its own.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    pub fn start(&mut self) -> bool {
        if self.state != GameState::Menu {
            return false;
        }
        self.begin_session();
        true
    }

    /// Starts a fresh session with the same difficulty. Abandons a running one.
    pub fn restart(&mut self) -> bool {
        if self.state == GameState::Menu {
            return false;
        }
        self.begin_session();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        info!("paused at score {}", self.score);
        self.state = GameState::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        info!("resumed");
        // Time spent paused must not count towards the next tick.
        self.clock.reset();
        self.state = GameState::Playing;
        true
    }

    /// Back to the menu from anywhere.
    pub fn close(&mut self) -> bool {
        if self.state == GameState::Menu {
            return false;
        }
        info!("back to menu");
        self.state = GameState::Menu;
        self.pending_direction = None;
        self.clock.reset();
        true
    }

    /// Takes a new drawing surface size. The grid is rebuilt from it at the
    /// next session start.
    pub fn resize(&mut self, width: u32, height: u32, config: &GameConfig) -> Result<(), ConfigError> {
        let config = GameConfig {
            width,
            height,
            ..config.clone()
        };
        self.next_grid = Some(config.grid()?);
        Ok(())
    }

    /// Buffers a turn for the next tick. In the menu it also starts a game.
    ///
    /// Only the last accepted turn before a tick counts. Turning onto the
    /// current heading, or straight back into the neck, is ignored.
    pub fn steer(&mut self, direction: Direction) -> bool {
        match self.state {
            GameState::Menu => {
                self.start();
            }
            GameState::Playing => {}
            GameState::Paused | GameState::GameOver => return false,
        }
        let current = self.snake.direction();
        if direction == current || self.is_reversal(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    fn is_reversal(&self, direction: Direction) -> bool {
        self.snake.len() >= 2 && direction.is_opposite(self.snake.direction())
    }

    fn begin_session(&mut self) {
        if let Some(grid) = self.next_grid.take() {
            self.grid = grid;
        }
        self.snake = Self::starting_snake(&self.grid);
        self.score = 0;
        self.level = 1;
        self.pending_direction = None;
        self.end_reason = None;
        self.clock.restart(self.difficulty);
        self.state = GameState::Playing;
        info!(
            "starting {} game on a {}x{} grid, {:?} between moves",
            self.difficulty,
            self.grid.tiles_x(),
            self.grid.tiles_y(),
            self.clock.interval()
        );
        self.food = None;
        self.respawn_food();
    }

    /// Places food off the snake, ending the session as a win when the board
    /// has no room left.
    fn respawn_food(&mut self) -> bool {
        let occupied: HashSet<Cell> = self.snake.segments().copied().collect();
        self.food = self.spawner.place(&self.grid, &occupied);
        match self.food {
            Some(cell) => {
                debug!("food at ({}, {})", cell.x, cell.y);
                true
            }
            None => {
                self.finish(EndReason::BoardFilled);
                false
            }
        }
    }

    /// Advances the simulation when the clock says a step is due.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.state != GameState::Playing || !self.clock.poll(now) {
            return None;
        }
        Some(self.tick())
    }

    /// One simulation step, regardless of timing.
    pub fn tick(&mut self) -> TickOutcome {
        if self.state != GameState::Playing {
            return TickOutcome::Idle;
        }

        if let Some(direction) = self.pending_direction.take() {
            if !self.is_reversal(direction) {
                self.snake.set_direction(direction);
            }
        }

        let direction = self.snake.direction();
        let head = self.snake.next_head(direction);
        if !self.grid.contains(head) {
            info!(
                "wall collision at ({}, {}), grid {}x{}",
                head.x,
                head.y,
                self.grid.tiles_x(),
                self.grid.tiles_y()
            );
            return self.finish(EndReason::WallCollision);
        }

        let ate_food = self.food == Some(head);
        if self.snake.collides_with_self(head, ate_food) {
            info!("self collision at ({}, {}), length {}", head.x, head.y, self.snake.len());
            return self.finish(EndReason::SelfCollision);
        }

        self.snake.advance(direction);
        self.snake.grow_or_shrink(ate_food);
        if !ate_food {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.level = level_for(self.score);
        self.clock.set_level(self.level);
        debug!("ate food, score {} level {}", self.score, self.level);
        if self.respawn_food() {
            TickOutcome::Ate
        } else {
            TickOutcome::Ended(EndReason::BoardFilled)
        }
    }

    fn finish(&mut self, reason: EndReason) -> TickOutcome {
        self.state = GameState::GameOver;
        self.end_reason = Some(reason);
        self.pending_direction = None;
        info!("game over: {reason}, score {}", self.score);
        if self.score > self.high_score {
            info!("new high score {} (was {})", self.score, self.high_score);
            self.high_score = self.score;
            self.store.save(self.score);
        }
        TickOutcome::Ended(reason)
    }

    /// Replaces the board of a running session. For replays and tests.
    pub fn arrange(&mut self, snake: Snake, food: Option<Cell>) -> bool {
        if !matches!(self.state, GameState::Playing | GameState::Paused) {
            return false;
        }
        self.snake = snake;
        self.food = food;
        self.pending_direction = None;
        true
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.segments().copied().collect(),
            food: self.food,
            tiles_x: self.grid.tiles_x(),
            tiles_y: self.grid.tiles_y(),
            cell_size: self.grid.cell_size(),
            hud: Hud {
                state: self.state,
                score: self.score,
                level: self.level,
                high_score: self.high_score,
                difficulty: self.difficulty,
                end_reason: self.end_reason,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn engine() -> GameEngine<MemoryStore> {
        let config = GameConfig {
            seed: Some(11),
            ..GameConfig::default()
        };
        GameEngine::new(&config, MemoryStore::default()).unwrap()
    }

    #[test]
    fn starts_in_menu_with_loaded_high_score() {
        let config = GameConfig::default();
        let engine = GameEngine::new(&config, MemoryStore::with_high_score(12)).unwrap();
        assert_eq!(engine.state(), GameState::Menu);
        assert_eq!(engine.high_score(), 12);
        assert_eq!(engine.store().loads, 1);
    }

    #[test]
    fn bad_config_is_rejected_up_front() {
        let config = GameConfig {
            cell_size: 0,
            ..GameConfig::default()
        };
        assert_eq!(
            GameEngine::new(&config, MemoryStore::default()).err(),
            Some(ConfigError::CellSizeZero)
        );
    }

    #[test]
    fn start_resets_the_session() {
        let mut engine = engine();
        assert!(engine.start());
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!((engine.score(), engine.level()), (0, 1));
        assert_eq!(engine.snake().len(), INITIAL_LENGTH);
        assert_eq!(engine.snake().head(), Cell::new(20, 10));
        assert_eq!(engine.snake().direction(), Direction::Right);
        let food = engine.food().unwrap();
        assert!(!engine.snake().contains(food));
    }

    #[test]
    fn invalid_transitions_are_ignored() {
        let mut engine = engine();
        assert!(!engine.pause());
        assert!(!engine.resume());
        assert!(!engine.restart());
        assert!(!engine.close());
        assert!(!engine.apply(Action::TogglePause));
        assert_eq!(engine.state(), GameState::Menu);
        assert_eq!(engine.tick(), TickOutcome::Idle);
    }

    #[test]
    fn difficulty_is_locked_while_playing() {
        let mut engine = engine();
        assert!(engine.select_difficulty(Difficulty::Hard));
        engine.start();
        assert!(!engine.select_difficulty(Difficulty::Easy));
        assert_eq!(engine.difficulty(), Difficulty::Hard);
        assert_eq!(engine.clock().difficulty(), Difficulty::Hard);
    }

    #[test]
    fn toggle_pause_flips_between_playing_and_paused() {
        let mut engine = engine();
        engine.start();
        assert!(engine.apply(Action::TogglePause));
        assert_eq!(engine.state(), GameState::Paused);
        assert_eq!(engine.tick(), TickOutcome::Idle);
        assert!(engine.apply(Action::TogglePause));
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn arrow_in_menu_starts_and_turns() {
        let mut engine = engine();
        assert!(engine.steer(Direction::Up));
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.pending_direction(), Some(Direction::Up));

        let mut engine = self::engine();
        assert!(!engine.steer(Direction::Left));
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.pending_direction(), None);
    }

    #[test]
    fn last_turn_before_a_tick_wins() {
        let mut engine = engine();
        engine.start();
        assert!(engine.steer(Direction::Up));
        assert!(engine.steer(Direction::Down));
        assert!(!engine.steer(Direction::Right));
        assert_eq!(engine.pending_direction(), Some(Direction::Down));
        engine.tick();
        assert_eq!(engine.snake().direction(), Direction::Down);
        assert_eq!(engine.pending_direction(), None);
    }

    #[test]
    fn close_returns_to_menu_from_anywhere() {
        let mut engine = engine();
        engine.start();
        engine.pause();
        assert!(engine.close());
        assert_eq!(engine.state(), GameState::Menu);
        assert!(engine.start());
    }

    #[test]
    fn resize_applies_at_next_start() {
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(&config, MemoryStore::default()).unwrap();
        assert_eq!(
            engine.resize(40, 200, &config),
            Err(ConfigError::AreaTooSmall { tiles_x: 2, tiles_y: 8 })
        );
        engine.resize(200, 240, &config).unwrap();
        assert_eq!(engine.grid().tiles_x(), 40);
        engine.start();
        assert_eq!((engine.grid().tiles_x(), engine.grid().tiles_y()), (10, 10));
    }

    #[test]
    fn update_ticks_on_clock_boundaries() {
        let mut engine = engine();
        engine.start();
        let start = Instant::now();
        assert_eq!(engine.update(start), None);
        assert_eq!(engine.update(start + engine.clock().interval()), None);
        let later = start + engine.clock().interval() * 2;
        assert!(matches!(engine.update(later), Some(TickOutcome::Moved | TickOutcome::Ate)));
    }

    #[test]
    fn pausing_holds_the_clock_until_resume() {
        let mut engine = engine();
        engine.start();
        let start = Instant::now();
        engine.update(start);
        engine.pause();
        let much_later = start + std::time::Duration::from_secs(60);
        assert_eq!(engine.update(much_later), None);
        engine.resume();
        assert_eq!(engine.update(much_later), None);
        let head = engine.snake().head();
        assert!(engine.update(much_later + engine.clock().interval() * 2).is_some());
        assert_eq!(engine.snake().head(), head.step(Direction::Right));
    }

    #[test]
    fn tiny_grid_still_fits_the_starting_snake() {
        let config = GameConfig {
            width: 3,
            height: 3,
            hud_height: 0,
            cell_size: 1,
            seed: Some(5),
            ..GameConfig::default()
        };
        let mut engine = GameEngine::new(&config, MemoryStore::default()).unwrap();
        engine.start();
        assert!(engine.snake().segments().all(|&cell| engine.grid().contains(cell)));
        assert_eq!(engine.snake().len(), INITIAL_LENGTH);
    }
}
