//! Cooperative simulation core
//!
//! All gameplay logic lives here. The scheduler steps every active
//! behavior exactly once per tick, strictly sequentially; behaviors share
//! one mutable context and spawn new behaviors that join at tick
//! boundaries. No rendering I/O or platform dependencies: behaviors draw
//! into a plain framebuffer, which keeps the whole module testable
//! headless.

pub mod behaviors;
pub mod context;
pub mod obstacle;
pub mod scheduler;

pub use context::{Bounds, SimConfig, SimContext};
pub use obstacle::{Obstacle, ObstacleId, ObstacleRegistry, Rect};
pub use scheduler::{Behavior, Scheduler, StepResult, run};
