//! Shared simulation state
//!
//! One `SimContext` is built at startup, owned by the run loop, and passed
//! `&mut` into every behavior step. Behaviors read and mutate it during
//! their step only; nothing holds an alias across ticks. Sequential
//! stepping is what makes the unlocked shared state safe; a threaded
//! reimplementation would need a lock around the whole context.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::InputState;
use crate::render::FrameBuffer;
use crate::sim::obstacle::ObstacleRegistry;
use crate::sim::scheduler::Behavior;
use crate::sprites::{Sprite, SpriteSet};

/// The screen rectangle, in cells, with a one-cell border on every side.
/// Playable coordinates are strictly inside the border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub rows: u16,
    pub cols: u16,
}

impl Bounds {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// First playable row.
    pub fn top(&self) -> i32 {
        BORDER as i32
    }

    /// First playable column.
    pub fn left(&self) -> i32 {
        BORDER as i32
    }

    /// Last playable row (inclusive).
    pub fn bottom(&self) -> i32 {
        self.rows as i32 - BORDER as i32 - 1
    }

    /// Last playable column (inclusive).
    pub fn right(&self) -> i32 {
        self.cols as i32 - BORDER as i32 - 1
    }

    /// True iff (row, col) is strictly inside the border.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.top() && row <= self.bottom() && col >= self.left() && col <= self.right()
    }

    /// Clamp a sprite's fractional top-left corner (x = col, y = row) so the
    /// whole sprite stays inside the playable area.
    pub fn clamp_sprite(&self, pos: Vec2, sprite: &Sprite) -> Vec2 {
        let max_row = (self.bottom() - sprite.rows() as i32 + 1).max(self.top()) as f32;
        let max_col = (self.right() - sprite.cols() as i32 + 1).max(self.left()) as f32;
        Vec2::new(
            pos.x.clamp(self.left() as f32, max_col),
            pos.y.clamp(self.top() as f32, max_row),
        )
    }
}

/// Sim tuning shared by the behaviors, split out of `Settings` so the sim
/// layer does not depend on file I/O concerns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimConfig {
    pub era_interval_ticks: u32,
    pub weapon_unlock_era: u32,
    pub debris_fall_speed: f32,
    pub projectile_speed: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            era_interval_ticks: ERA_INTERVAL_TICKS,
            weapon_unlock_era: WEAPON_UNLOCK_ERA,
            debris_fall_speed: DEBRIS_FALL_SPEED,
            projectile_speed: PROJECTILE_SPEED,
        }
    }
}

/// All state reachable from every behavior.
pub struct SimContext {
    /// Ticks elapsed since the run started
    pub tick: u64,
    /// Current simulated year; advanced only by the era clock
    pub era: u32,
    /// Points scored by destroying debris
    pub score: u64,
    pub bounds: Bounds,
    pub config: SimConfig,
    pub sprites: SpriteSet,
    /// Index into `sprites.ship`, swapped by the ship animator
    pub ship_frame: usize,
    pub obstacles: ObstacleRegistry,
    /// Input accumulated for the current tick
    pub input: InputState,
    /// Frame being composed this tick
    pub frame: FrameBuffer,
    pub rng: Pcg32,
    /// Latched when the ship is destroyed; gameplay is over but the loop
    /// keeps running until the player quits
    pub game_over: bool,
    pending: Vec<Box<dyn Behavior>>,
    next_id: u32,
}

impl SimContext {
    pub fn new(
        bounds: Bounds,
        config: SimConfig,
        sprites: SpriteSet,
        seed: u64,
        start_era: u32,
    ) -> Self {
        Self {
            tick: 0,
            era: start_era,
            score: 0,
            bounds,
            config,
            sprites,
            ship_frame: 0,
            obstacles: ObstacleRegistry::new(),
            input: InputState::default(),
            frame: FrameBuffer::new(bounds.rows, bounds.cols),
            rng: Pcg32::seed_from_u64(seed),
            game_over: false,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity id.
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The ship frame currently selected by the animator.
    pub fn ship_sprite(&self) -> &Sprite {
        &self.sprites.ship[self.ship_frame % self.sprites.ship.len()]
    }

    /// Queue a behavior for the scheduler. It joins the active collection
    /// at the next tick boundary, so it is first stepped next tick.
    pub fn spawn(&mut self, behavior: Box<dyn Behavior>) {
        log::debug!("spawning behavior '{}'", behavior.name());
        self.pending.push(behavior);
    }

    pub(crate) fn take_pending(&mut self) -> Vec<Box<dyn Behavior>> {
        std::mem::take(&mut self.pending)
    }

    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}
