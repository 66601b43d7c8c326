//! Player ship: movement, firing, destruction
//!
//! Two behaviors share the ship by writing disjoint state: `ShipAnimator`
//! selects the sprite frame, `ShipControl` owns the position. Both are read
//! together when the ship is drawn.

use glam::Vec2;
use rand::Rng;

use crate::consts::MAX_SHIP_SPEED;
use crate::sim::behaviors::{GameOverDisplay, ProjectileFlight};
use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// Cycles `ctx.ship_frame` through the ship sprite sequence, one frame per
/// tick. Never terminates.
#[derive(Debug, Default)]
pub struct ShipAnimator {
    frame: usize,
}

impl ShipAnimator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for ShipAnimator {
    fn name(&self) -> &'static str {
        "ship-animator"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        ctx.ship_frame = self.frame;
        self.frame = (self.frame + 1) % ctx.sprites.ship.len();
        StepResult::Continue
    }
}

/// Steers the ship from accumulated input, fires, and dies on contact.
///
/// Velocity is additive: every directional press polled this tick adds a
/// unit vector, and nothing decays it. Each axis is capped at
/// `MAX_SHIP_SPEED` cells per tick so the accumulated speed stays
/// controllable.
pub struct ShipControl {
    /// Top-left corner of the ship sprite (x = col, y = row)
    pos: Vec2,
    vel: Vec2,
}

impl ShipControl {
    pub fn new(row: f32, col: f32) -> Self {
        Self {
            pos: Vec2::new(col, row),
            vel: Vec2::ZERO,
        }
    }

    /// Spawn position: bottom of the playable area, horizontally centered.
    pub fn at_launch_pad(ctx: &SimContext) -> Self {
        let sprite = ctx.ship_sprite();
        let row = ctx.bounds.bottom() - sprite.rows() as i32 + 1;
        let col = (ctx.bounds.cols as i32 - sprite.cols() as i32) / 2;
        Self::new(row as f32, col as f32)
    }
}

impl Behavior for ShipControl {
    fn name(&self) -> &'static str {
        "ship-control"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        let input = ctx.input.clone();

        self.vel.x += input.col_accel();
        self.vel.y += input.row_accel();
        self.vel = self.vel.clamp(
            Vec2::splat(-MAX_SHIP_SPEED),
            Vec2::splat(MAX_SHIP_SPEED),
        );

        self.pos += self.vel;
        self.pos = ctx.bounds.clamp_sprite(self.pos, ctx.ship_sprite());

        let sprite_cols = ctx.ship_sprite().cols() as i32;
        let row = self.pos.y.round() as i32;
        let col = self.pos.x.round() as i32;

        if input.fire && ctx.era >= ctx.config.weapon_unlock_era {
            let nose_col = col + sprite_cols / 2;
            let speed = ctx.config.projectile_speed;
            ctx.spawn(Box::new(ProjectileFlight::straight_up(
                row as f32,
                nose_col as f32,
                speed,
            )));
        }

        ctx.frame
            .draw_sprite(row, col, &ctx.sprites.ship[ctx.ship_frame]);

        // the ship collides as a single point at its sprite anchor
        if let Some(id) = ctx.obstacles.hit_test(row, col) {
            log::info!("ship destroyed by obstacle {id} at tick {}", ctx.tick);
            ctx.game_over = true;
            let banner = ctx.rng.random_range(0..ctx.sprites.gameover.len());
            ctx.spawn(Box::new(GameOverDisplay::new(banner)));
            return StepResult::Finished;
        }

        StepResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ControlSignal;
    use crate::sim::obstacle::{Obstacle, Rect};
    use crate::sim::test_support::test_context;
    use proptest::prelude::*;

    #[test]
    fn test_presses_accumulate_into_velocity() {
        let mut ctx = test_context();
        let mut ship = ShipControl::new(10.0, 10.0);
        ctx.input.apply(ControlSignal::MoveRight);
        ctx.input.apply(ControlSignal::MoveRight);
        ship.step(&mut ctx);
        assert_eq!(ship.pos, Vec2::new(12.0, 10.0));

        // velocity persists with no further input
        ctx.input = Default::default();
        ship.step(&mut ctx);
        assert_eq!(ship.pos, Vec2::new(14.0, 10.0));
    }

    #[test]
    fn test_velocity_clamped_per_axis() {
        let mut ctx = test_context();
        let mut ship = ShipControl::new(10.0, 10.0);
        for _ in 0..8 {
            ctx.input.apply(ControlSignal::MoveDown);
        }
        ship.step(&mut ctx);
        assert_eq!(ship.vel, Vec2::new(0.0, MAX_SHIP_SPEED));
    }

    #[test]
    fn test_position_clamped_inside_bounds() {
        let mut ctx = test_context();
        let mut ship = ShipControl::new(2.0, 2.0);
        for _ in 0..200 {
            ctx.input.apply(ControlSignal::MoveUp);
            ctx.input.apply(ControlSignal::MoveLeft);
            ship.step(&mut ctx);
            ctx.input = Default::default();
        }
        assert_eq!(ship.pos, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_fire_before_unlock_era_spawns_nothing() {
        let mut ctx = test_context();
        ctx.era = ctx.config.weapon_unlock_era - 1;
        let mut ship = ShipControl::new(10.0, 10.0);
        ctx.input.apply(ControlSignal::Fire);
        ship.step(&mut ctx);
        assert_eq!(ctx.pending_count(), 0);
    }

    #[test]
    fn test_fire_after_unlock_era_spawns_projectile() {
        let mut ctx = test_context();
        ctx.era = ctx.config.weapon_unlock_era;
        let mut ship = ShipControl::new(10.0, 10.0);
        ctx.input.apply(ControlSignal::Fire);
        ship.step(&mut ctx);
        assert_eq!(ctx.pending_count(), 1);
    }

    #[test]
    fn test_obstacle_contact_spawns_game_over_and_terminates() {
        let mut ctx = test_context();
        ctx.obstacles.register(Obstacle {
            id: 1,
            rect: Rect::new(8, 8, 5, 5),
        });
        let mut ship = ShipControl::new(10.0, 10.0);
        let result = ship.step(&mut ctx);
        assert_eq!(result, StepResult::Finished);
        assert!(ctx.game_over);
        assert_eq!(ctx.pending_count(), 1);
    }

    #[test]
    fn test_animator_cycles_frames() {
        let mut ctx = test_context();
        let frames = ctx.sprites.ship.len();
        let mut animator = ShipAnimator::new();
        for expected in 0..frames * 2 {
            animator.step(&mut ctx);
            assert_eq!(ctx.ship_frame, expected % frames);
        }
    }

    proptest! {
        #[test]
        fn prop_ship_stays_inside_bounds(presses in proptest::collection::vec(0u8..4, 0..60)) {
            let mut ctx = test_context();
            let mut ship = ShipControl::at_launch_pad(&ctx);
            for press in presses {
                let signal = match press {
                    0 => ControlSignal::MoveUp,
                    1 => ControlSignal::MoveDown,
                    2 => ControlSignal::MoveLeft,
                    _ => ControlSignal::MoveRight,
                };
                ctx.input.apply(signal);
                ship.step(&mut ctx);
                let sprite = ctx.ship_sprite();
                prop_assert!(ship.pos.y >= ctx.bounds.top() as f32);
                prop_assert!(ship.pos.x >= ctx.bounds.left() as f32);
                prop_assert!(
                    ship.pos.y + sprite.rows() as f32 - 1.0 <= ctx.bounds.bottom() as f32
                );
                prop_assert!(
                    ship.pos.x + sprite.cols() as f32 - 1.0 <= ctx.bounds.right() as f32
                );
            }
        }
    }
}
