//! Debris explosion animation

use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// Plays the explosion sprite sequence centered on a point, one frame per
/// tick, then finishes. No collision or lifecycle interaction.
pub struct ExplosionEffect {
    center_row: i32,
    center_col: i32,
    frame: usize,
}

impl ExplosionEffect {
    pub fn new(center_row: i32, center_col: i32) -> Self {
        Self {
            center_row,
            center_col,
            frame: 0,
        }
    }
}

impl Behavior for ExplosionEffect {
    fn name(&self) -> &'static str {
        "explosion-effect"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        let sprite = &ctx.sprites.explosion[self.frame];
        let top = self.center_row - sprite.rows() as i32 / 2;
        let left = self.center_col - sprite.cols() as i32 / 2;
        ctx.frame.draw_sprite(top, left, sprite);

        self.frame += 1;
        if self.frame == ctx.sprites.explosion.len() {
            StepResult::Finished
        } else {
            StepResult::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::test_support::test_context;

    #[test]
    fn test_plays_every_frame_then_finishes() {
        let mut ctx = test_context();
        let frames = ctx.sprites.explosion.len();
        let mut explosion = ExplosionEffect::new(10, 10);
        for _ in 0..frames - 1 {
            assert_eq!(explosion.step(&mut ctx), StepResult::Continue);
        }
        // the final frame is drawn on the finishing tick
        assert_eq!(explosion.step(&mut ctx), StepResult::Finished);
    }

    #[test]
    fn test_draws_centered_on_point() {
        let mut ctx = test_context();
        let mut explosion = ExplosionEffect::new(10, 10);
        explosion.step(&mut ctx);
        let sprite = &ctx.sprites.explosion[0];
        let top = 10 - sprite.rows() as i32 / 2;
        let left = 10 - sprite.cols() as i32 / 2;
        // first non-space glyph of the first line lands relative to (top, left)
        let line = sprite.lines().next().unwrap();
        let offset = line.chars().position(|c| c != ' ').unwrap();
        let expected = line.chars().nth(offset).unwrap();
        assert_eq!(
            ctx.frame.cell(top as u16, (left + offset as i32) as u16).glyph,
            expected
        );
    }
}
