//! Non-blocking keyboard input
//!
//! Each tick the run loop drains every key event that arrived since the
//! previous poll. Directional keys are counted rather than flagged: pressing
//! a direction twice between polls accelerates the ship twice.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

/// A single decoded control event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
    Quit,
}

/// Everything the player asked for since the last poll.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
    pub fire: bool,
    pub quit: bool,
}

impl InputState {
    pub fn apply(&mut self, signal: ControlSignal) {
        match signal {
            ControlSignal::MoveUp => self.up += 1,
            ControlSignal::MoveDown => self.down += 1,
            ControlSignal::MoveLeft => self.left += 1,
            ControlSignal::MoveRight => self.right += 1,
            ControlSignal::Fire => self.fire = true,
            ControlSignal::Quit => self.quit = true,
        }
    }

    /// Net vertical acceleration from this poll (rows, positive = down).
    pub fn row_accel(&self) -> f32 {
        self.down as f32 - self.up as f32
    }

    /// Net horizontal acceleration from this poll (cols, positive = right).
    pub fn col_accel(&self) -> f32 {
        self.right as f32 - self.left as f32
    }
}

/// Source of player input, polled once per tick.
pub trait InputSource {
    fn poll(&mut self) -> io::Result<InputState>;
}

/// Crossterm-backed keyboard input.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll(&mut self) -> io::Result<InputState> {
        let mut state = InputState::default();
        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                continue;
            }
            let signal = match key.code {
                KeyCode::Up => Some(ControlSignal::MoveUp),
                KeyCode::Down => Some(ControlSignal::MoveDown),
                KeyCode::Left => Some(ControlSignal::MoveLeft),
                KeyCode::Right => Some(ControlSignal::MoveRight),
                KeyCode::Char(' ') => Some(ControlSignal::Fire),
                KeyCode::Char('q') | KeyCode::Esc => Some(ControlSignal::Quit),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(ControlSignal::Quit)
                }
                _ => None,
            };
            if let Some(signal) = signal {
                state.apply(signal);
            }
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_presses_accumulate() {
        let mut state = InputState::default();
        state.apply(ControlSignal::MoveUp);
        state.apply(ControlSignal::MoveUp);
        state.apply(ControlSignal::MoveRight);
        assert_eq!(state.row_accel(), -2.0);
        assert_eq!(state.col_accel(), 1.0);
    }

    #[test]
    fn test_opposite_presses_cancel() {
        let mut state = InputState::default();
        state.apply(ControlSignal::MoveLeft);
        state.apply(ControlSignal::MoveRight);
        assert_eq!(state.col_accel(), 0.0);
    }

    #[test]
    fn test_fire_and_quit_latch() {
        let mut state = InputState::default();
        state.apply(ControlSignal::Fire);
        state.apply(ControlSignal::Fire);
        assert!(state.fire);
        assert!(!state.quit);
        state.apply(ControlSignal::Quit);
        assert!(state.quit);
    }
}
