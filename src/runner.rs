use std::time::{Duration, Instant};

use anyhow::Result;
use log::info;

use crate::engine::{GameEngine, TickOutcome};
use crate::input::{Input, InputSource};
use crate::render::Renderer;
use crate::store::HighScoreStore;

/// How long one frame waits for input before redrawing.
pub const FRAME: Duration = Duration::from_millis(16);

/// The one loop driving an engine: read input, step when due, draw.
///
/// Restarting a game resets the engine in place, so there is never more than
/// one loop advancing the snake.
pub struct Runner<S, R, I> {
    engine: GameEngine<S>,
    renderer: R,
    input: I,
    running: bool,
}

impl<S, R, I> Runner<S, R, I>
where
    S: HighScoreStore,
    R: Renderer,
    I: InputSource,
{
    pub fn new(engine: GameEngine<S>, renderer: R, input: I) -> Self {
        Self {
            engine,
            renderer,
            input,
            running: false,
        }
    }

    pub fn engine(&self) -> &GameEngine<S> {
        &self.engine
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ends the loop after the current frame.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn into_parts(self) -> (GameEngine<S>, R, I) {
        (self.engine, self.renderer, self.input)
    }

    /// Runs until stopped or the player quits.
    pub fn run(&mut self) -> Result<()> {
        self.running = true;
        self.renderer.draw(&self.engine.snapshot())?;
        while self.running {
            let input = self.input.poll(FRAME)?;
            self.frame(input, Instant::now())?;
        }
        info!("loop stopped");
        Ok(())
    }

    /// One pass of the loop at `now`.
    pub fn frame(&mut self, input: Option<Input>, now: Instant) -> Result<()> {
        if let Some(input) = input {
            self.handle(input);
        }
        if !self.running {
            return Ok(());
        }
        if let Some(TickOutcome::Ended(reason)) = self.engine.update(now) {
            info!("game ended: {reason}, score {}", self.engine.score());
        }
        self.renderer.draw(&self.engine.snapshot())
    }

    fn handle(&mut self, input: Input) {
        match input {
            Input::Steer(direction) => {
                self.engine.steer(direction);
            }
            Input::Control(action) => {
                self.engine.apply(action);
            }
            Input::Quit => {
                info!("quit requested");
                self.stop();
            }
        }
    }
}
