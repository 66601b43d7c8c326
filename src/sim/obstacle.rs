//! Obstacles and the collision handoff
//!
//! Every piece of falling debris owns one rectangular hitbox, registered
//! here for its whole life. Projectiles and the ship test points against
//! the live set; a hit is recorded with `mark_collision` and observed by
//! the owning debris behavior through `consume_collision` on its next step.
//! That mark/consume pair is a single-producer/single-consumer handoff per
//! obstacle: a mark never outlives one full step of its owner.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub type ObstacleId = u32;

/// An axis-aligned cell rectangle: rows `[top, top + rows)`,
/// columns `[left, left + cols)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub top: i32,
    pub left: i32,
    pub rows: u16,
    pub cols: u16,
}

impl Rect {
    pub fn new(top: i32, left: i32, rows: u16, cols: u16) -> Self {
        Self {
            top,
            left,
            rows,
            cols,
        }
    }

    /// Point membership, half-open on both axes.
    pub fn contains(&self, row: i32, col: i32) -> bool {
        row >= self.top
            && row < self.top + self.rows as i32
            && col >= self.left
            && col < self.left + self.cols as i32
    }

    /// Axis-aligned overlap test.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.top < other.top + other.rows as i32
            && other.top < self.top + self.rows as i32
            && self.left < other.left + other.cols as i32
            && other.left < self.left + self.cols as i32
    }

    /// Center cell of the rectangle.
    pub fn center(&self) -> (i32, i32) {
        (
            self.top + self.rows as i32 / 2,
            self.left + self.cols as i32 / 2,
        )
    }
}

/// A live rectangular hazard. `rect.top` advances as the debris falls.
#[derive(Debug, Clone, Copy)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub rect: Rect,
}

impl Obstacle {
    /// True iff the point (row, col) lies within the current hitbox.
    pub fn has_collision(&self, row: i32, col: i32) -> bool {
        self.rect.contains(row, col)
    }
}

/// The set of live obstacles plus the transient collision marks.
#[derive(Debug, Default)]
pub struct ObstacleRegistry {
    obstacles: Vec<Obstacle>,
    in_collision: HashSet<ObstacleId>,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new obstacle. Ids must be unique; reusing one is a defect.
    pub fn register(&mut self, obstacle: Obstacle) {
        assert!(
            self.get(obstacle.id).is_none(),
            "obstacle id {} registered twice",
            obstacle.id
        );
        self.obstacles.push(obstacle);
    }

    /// Remove an obstacle and any mark still pending against it.
    pub fn unregister(&mut self, id: ObstacleId) {
        self.obstacles.retain(|o| o.id != id);
        self.in_collision.remove(&id);
    }

    pub fn get(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObstacleId) -> Option<&mut Obstacle> {
        self.obstacles.iter_mut().find(|o| o.id == id)
    }

    /// Live obstacles in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// First live obstacle containing the point, if any.
    pub fn hit_test(&self, row: i32, col: i32) -> Option<ObstacleId> {
        self.obstacles
            .iter()
            .find(|o| o.has_collision(row, col))
            .map(|o| o.id)
    }

    /// Record a hit against a live obstacle. Idempotent within a tick.
    pub fn mark_collision(&mut self, id: ObstacleId) {
        assert!(
            self.get(id).is_some(),
            "collision marked on unregistered obstacle {id}"
        );
        self.in_collision.insert(id);
    }

    /// Check-and-clear the mark for an obstacle. The only way marks are
    /// observed; returns false on a second call without a new mark.
    pub fn consume_collision(&mut self, id: ObstacleId) -> bool {
        self.in_collision.remove(&id)
    }
}
