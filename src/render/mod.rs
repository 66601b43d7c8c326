//! Terminal rendering
//!
//! Behaviors draw into a plain framebuffer during their step; after every
//! behavior has run, the composed frame is flushed to the terminal. The
//! flush is differential: only cells that changed since the previous frame
//! are rewritten, so an entity that moved leaves blanks behind automatically.

pub mod fb;
pub mod terminal;

pub use fb::{Cell, FrameBuffer, Intensity};
pub use terminal::TerminalScreen;
