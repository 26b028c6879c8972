use std::collections::VecDeque;
use std::time::Duration;

use anyhow::Result;

use crate::engine::Action;
use crate::grid::Direction;

/// Something the player asked for, whatever the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Steer(Direction),
    Control(Action),
    /// Leave the program.
    Quit,
}

pub trait InputSource {
    /// Waits at most `timeout` for the next input.
    fn poll(&mut self, timeout: Duration) -> Result<Option<Input>>;
}

/// Replays a fixed list of inputs, then reports `Quit`.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    inputs: VecDeque<Input>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = Input>) -> Self {
        Self {
            inputs: inputs.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> Result<Option<Input>> {
        Ok(Some(self.inputs.pop_front().unwrap_or(Input::Quit)))
    }
}
