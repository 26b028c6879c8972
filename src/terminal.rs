//! crossterm front end: draws snapshots as text and reads the keyboard.

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;

use crate::clock::Difficulty;
use crate::engine::{Action, GameState};
use crate::grid::{Cell, Direction};
use crate::input::{Input, InputSource};
use crate::render::{Hud, Renderer, Snapshot};

/// Raw mode and the alternate screen for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), EnterAlternateScreen, Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(stdout(), Show, LeaveAlternateScreen) {
            warn!("failed to restore the screen: {err}");
        }
        if let Err(err) = terminal::disable_raw_mode() {
            warn!("failed to disable raw mode: {err}");
        }
    }
}

/// One character per grid cell inside a `#` border.
pub struct TerminalRenderer {
    out: Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn draw(&mut self, snapshot: &Snapshot) -> Result<()> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for (row, line) in field_lines(snapshot).iter().enumerate() {
            queue!(self.out, MoveTo(0, clamp(row)), Print(line))?;
        }

        let below = framed(snapshot.tiles_y);
        queue!(self.out, MoveTo(0, below), Print(info_bar(&snapshot.hud)))?;
        queue!(self.out, MoveTo(0, below.saturating_add(1)), Print(HELP))?;

        let lines = overlay_lines(&snapshot.hud);
        let top = framed(snapshot.tiles_y).saturating_sub(clamp(lines.len())) / 2;
        for (i, line) in lines.iter().enumerate() {
            let left = framed(snapshot.tiles_x).saturating_sub(clamp(line.chars().count())) / 2;
            queue!(self.out, MoveTo(left, top.saturating_add(clamp(i))), Print(line))?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Terminal columns or rows taken by `tiles` cells plus the border.
fn framed(tiles: u32) -> u16 {
    u16::try_from(tiles).unwrap_or(u16::MAX).saturating_add(2)
}

fn clamp(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

const HELP: &str = "arrows move, p pause, space restart, esc menu, q quit";

/// The bordered field as text rows.
fn field_lines(snapshot: &Snapshot) -> Vec<String> {
    let (width, height) = (snapshot.tiles_x as usize, snapshot.tiles_y as usize);
    let mut rows = vec![vec![' '; width]; height];
    if matches!(snapshot.hud.state, GameState::Playing | GameState::Paused | GameState::GameOver) {
        if let Some(Cell { x, y }) = snapshot.food {
            if let Some(slot) = rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
                *slot = '*';
            }
        }
        for (i, &Cell { x, y }) in snapshot.snake.iter().enumerate().rev() {
            if let Some(slot) = rows.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
                *slot = if i == 0 { 'O' } else { 'o' };
            }
        }
    }

    let border = "#".repeat(width + 2);
    let mut lines = Vec::with_capacity(height + 2);
    lines.push(border.clone());
    lines.extend(rows.into_iter().map(|row| {
        let mut line = String::with_capacity(width + 2);
        line.push('#');
        line.extend(row);
        line.push('#');
        line
    }));
    lines.push(border);
    lines
}

fn info_bar(hud: &Hud) -> String {
    match hud.state {
        GameState::Menu => format!("High Score: {}", hud.high_score),
        _ => format!(
            "Score: {}  Level: {}  High Score: {}  {}",
            hud.score, hud.level, hud.high_score, hud.difficulty
        ),
    }
}

fn overlay_lines(hud: &Hud) -> Vec<String> {
    match hud.state {
        GameState::Playing => Vec::new(),
        GameState::Menu => {
            let mut lines = vec![
                "Snake Game".to_string(),
                "Arrows steer, food makes you grow".to_string(),
                "Select difficulty:".to_string(),
            ];
            lines.extend(Difficulty::ALL.iter().enumerate().map(|(i, &difficulty)| {
                let marker = if difficulty == hud.difficulty { '>' } else { ' ' };
                format!("{marker} {} {difficulty}", i + 1)
            }));
            lines.push("Enter or an arrow to start".to_string());
            lines
        }
        GameState::Paused => vec![
            "Game Paused".to_string(),
            "Press P again to resume".to_string(),
        ],
        GameState::GameOver => {
            let title = match hud.end_reason {
                Some(reason) if reason.is_win() => "You Win!",
                _ => "Game Over",
            };
            vec![
                title.to_string(),
                format!("Your Score: {}", hud.score),
                format!("High Score: {}", hud.high_score),
                "Space to restart".to_string(),
            ]
        }
    }
}

/// Reads key presses from the terminal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }
}

/// Key bindings.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }
    let input = match key.code {
        KeyCode::Up => Input::Steer(Direction::Up),
        KeyCode::Down => Input::Steer(Direction::Down),
        KeyCode::Left => Input::Steer(Direction::Left),
        KeyCode::Right => Input::Steer(Direction::Right),
        KeyCode::Char('p' | 'P') => Input::Control(Action::TogglePause),
        KeyCode::Char(' ') => Input::Control(Action::Restart),
        KeyCode::Enter => Input::Control(Action::Start),
        KeyCode::Char('1') => Input::Control(Action::SelectDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Input::Control(Action::SelectDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Input::Control(Action::SelectDifficulty(Difficulty::Hard)),
        KeyCode::Esc | KeyCode::Char('m') => Input::Control(Action::Close),
        KeyCode::Char('q') => Input::Quit,
        _ => return None,
    };
    Some(input)
}
