//! Terminal backend
//!
//! Owns the terminal for the duration of a run: raw mode, alternate screen,
//! hidden cursor. `present` diffs the composed frame against the previously
//! flushed one and rewrites only the cells that changed, tracking the last
//! emitted attribute so redundant escape codes are skipped.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use super::fb::{FrameBuffer, Intensity};

/// The live terminal screen and the last frame flushed to it.
pub struct TerminalScreen {
    out: Stdout,
    prev: Option<FrameBuffer>,
    active: bool,
}

impl TerminalScreen {
    /// Take over the terminal: raw mode, alternate screen, cursor hidden.
    pub fn enter() -> io::Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self {
            out,
            prev: None,
            active: true,
        })
    }

    /// Flush a composed frame, rewriting only cells that changed.
    pub fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let mut last_attr = Attribute::Reset;
        for row in 0..frame.rows() {
            for col in 0..frame.cols() {
                let cell = frame.cell(row, col);
                if let Some(prev) = &self.prev {
                    if prev.rows() == frame.rows()
                        && prev.cols() == frame.cols()
                        && prev.cell(row, col) == cell
                    {
                        continue;
                    }
                }
                let attr = match cell.intensity {
                    Intensity::Dim => Attribute::Dim,
                    Intensity::Normal => Attribute::Reset,
                    Intensity::Bold => Attribute::Bold,
                };
                queue!(self.out, MoveTo(col, row))?;
                if attr != last_attr {
                    queue!(self.out, SetAttribute(Attribute::Reset))?;
                    if attr != Attribute::Reset {
                        queue!(self.out, SetAttribute(attr))?;
                    }
                    last_attr = attr;
                }
                queue!(self.out, Print(cell.glyph))?;
            }
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()?;
        self.prev = Some(frame.clone());
        Ok(())
    }

    /// Hand the terminal back. Called automatically on drop.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        execute!(self.out, Show, LeaveAlternateScreen)?;
        disable_raw_mode()
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        // Restore the user's terminal even if the loop panicked.
        let _ = self.leave();
    }
}
