use std::collections::VecDeque;

use crate::grid::{Cell, Direction};

pub const INITIAL_LENGTH: usize = 3;

/// The snake body, head first.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// A horizontal snake of `length` cells with its head at `head`, trailing
    /// off to the left and facing right.
    pub fn new(head: Cell, length: usize) -> Self {
        let length = length.max(1);
        let body = (0..length as i32)
            .map(|i| Cell::new(head.x - i, head.y))
            .collect();
        Self {
            body,
            direction: Direction::Right,
        }
    }

    /// Builds a snake from explicit segments, head first. Returns `None` for an
    /// empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>, direction: Direction) -> Option<Self> {
        let body: VecDeque<Cell> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Where the head lands after one step towards `direction`.
    pub fn next_head(&self, direction: Direction) -> Cell {
        self.head().step(direction)
    }

    /// Prepends the next head. Pair with [`Snake::grow_or_shrink`].
    pub fn advance(&mut self, direction: Direction) {
        let head = self.next_head(direction);
        self.body.push_front(head);
    }

    /// Drops the tail unless food was eaten this step.
    pub fn grow_or_shrink(&mut self, ate_food: bool) {
        if !ate_food && self.body.len() > 1 {
            let _ = self.body.pop_back();
        }
    }

    /// Whether `head` runs into the body. The tail is skipped when it moves
    /// away this step, i.e. when no food is eaten.
    pub fn collides_with_self(&self, head: Cell, ate_food: bool) -> bool {
        let checked = if ate_food {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|&segment| segment == head)
    }
}
