//! Plasma shot flight

use glam::Vec2;

use crate::render::Intensity;
use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// The two muzzle-flash ticks before the shot starts moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    FlashStar,
    FlashRing,
    Flight,
}

/// One shot: a short muzzle flash at the origin, then fixed-velocity
/// flight until it leaves the field or hits the first obstacle. A hit
/// marks that obstacle's collision and consumes the shot the same tick.
pub struct ProjectileFlight {
    /// Position (x = col, y = row)
    pos: Vec2,
    vel: Vec2,
    phase: Phase,
}

impl ProjectileFlight {
    pub fn new(row: f32, col: f32, row_speed: f32, col_speed: f32) -> Self {
        Self {
            pos: Vec2::new(col, row),
            vel: Vec2::new(col_speed, row_speed),
            phase: Phase::FlashStar,
        }
    }

    /// The default shot: straight up at `speed` rows per tick.
    pub fn straight_up(row: f32, col: f32, speed: f32) -> Self {
        Self::new(row, col, -speed, 0.0)
    }

    fn glyph(&self) -> char {
        if self.vel.x != 0.0 { '-' } else { '|' }
    }
}

impl Behavior for ProjectileFlight {
    fn name(&self) -> &'static str {
        "projectile-flight"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        let row = self.pos.y.round() as i32;
        let col = self.pos.x.round() as i32;

        match self.phase {
            Phase::FlashStar => {
                ctx.frame.put(row, col, '*', Intensity::Normal);
                self.phase = Phase::FlashRing;
                StepResult::Continue
            }
            Phase::FlashRing => {
                ctx.frame.put(row, col, 'O', Intensity::Normal);
                self.phase = Phase::Flight;
                StepResult::Continue
            }
            Phase::Flight => {
                self.pos += self.vel;
                let row = self.pos.y.round() as i32;
                let col = self.pos.x.round() as i32;

                if !ctx.bounds.contains(row, col) {
                    // shot missed everything and left the field
                    return StepResult::Finished;
                }
                if let Some(id) = ctx.obstacles.hit_test(row, col) {
                    ctx.obstacles.mark_collision(id);
                    log::debug!("projectile hit obstacle {id} at ({row}, {col})");
                    return StepResult::Finished;
                }

                ctx.frame.put(row, col, self.glyph(), Intensity::Normal);
                StepResult::Continue
            }
        }
    }
}
