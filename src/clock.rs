use std::fmt;
use std::time::{Duration, Instant};

use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Milliseconds between steps: `(base, per-level decrement, floor)`.
struct Pace {
    base: u64,
    step: u64,
    floor: u64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    fn pace(self) -> Pace {
        match self {
            Difficulty::Easy => Pace { base: 140, step: 4, floor: 80 },
            Difficulty::Normal => Pace { base: 80, step: 3, floor: 40 },
            Difficulty::Hard => Pace { base: 40, step: 2, floor: 20 },
        }
    }

    /// Time between simulation steps at `level` (1-based).
    pub fn interval(self, level: u32) -> Duration {
        let Pace { base, step, floor } = self.pace();
        let speedup = u64::from(level.saturating_sub(1)).saturating_mul(step);
        Duration::from_millis(base.saturating_sub(speedup).max(floor))
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Turns wall time into discrete ticks, independent of how often the caller
/// redraws.
#[derive(Debug, Clone)]
pub struct GameClock {
    difficulty: Difficulty,
    level: u32,
    last_tick: Option<Instant>,
}

impl GameClock {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            level: 1,
            last_tick: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level.max(1);
    }

    pub fn interval(&self) -> Duration {
        self.difficulty.interval(self.level)
    }

    /// True once strictly more than one interval has elapsed.
    pub fn should_tick(&self, elapsed: Duration) -> bool {
        elapsed > self.interval()
    }

    /// Reports whether a tick is due at `now`. The first call after a reset
    /// only records `now` as the timing base. A due tick moves the base to
    /// `now`, so a long stall yields one tick, not a burst.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_tick {
            None => {
                self.last_tick = Some(now);
                false
            }
            Some(last) if self.should_tick(now.saturating_duration_since(last)) => {
                self.last_tick = Some(now);
                true
            }
            Some(_) => false,
        }
    }

    /// Forgets the timing base.
    pub fn reset(&mut self) {
        self.last_tick = None;
    }

    /// Starts over for a new session.
    pub fn restart(&mut self, difficulty: Difficulty) {
        *self = Self::new(difficulty);
    }
}
