//! Terminal game-over banner

use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// Draws a game-over banner centered in the playable area every tick,
/// forever. Spawned only by ship destruction; the run keeps ticking (stars
/// blink, debris falls) until the player quits.
pub struct GameOverDisplay {
    banner: usize,
}

impl GameOverDisplay {
    /// `banner` indexes the gameover sprite category.
    pub fn new(banner: usize) -> Self {
        Self { banner }
    }
}

impl Behavior for GameOverDisplay {
    fn name(&self) -> &'static str {
        "game-over"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        let sprite = &ctx.sprites.gameover[self.banner % ctx.sprites.gameover.len()];
        let top = (ctx.bounds.rows as i32 - sprite.rows() as i32).max(0) / 2;
        let left = (ctx.bounds.cols as i32 - sprite.cols() as i32).max(0) / 2;
        ctx.frame.draw_sprite(top, left, sprite);
        StepResult::Continue
    }
}
