//! Falling debris: the spawner and each piece's fall

use rand::Rng;

use crate::consts::DEBRIS_SCORE;
use crate::sim::behaviors::ExplosionEffect;
use crate::sim::context::SimContext;
use crate::sim::obstacle::{Obstacle, ObstacleId, Rect};
use crate::sim::scheduler::{Behavior, StepResult};

/// Ticks between debris spawns for a given era. The orbit stays clean until
/// 1961; later eras spawn faster.
pub fn debris_spawn_interval(era: u32) -> Option<u32> {
    match era {
        0..1961 => None,
        1961..1969 => Some(20),
        1969..1981 => Some(14),
        1981..1995 => Some(10),
        1995..2010 => Some(8),
        2010..2020 => Some(6),
        _ => Some(2),
    }
}

/// Spawns one DebrisFall (and registers its obstacle) every
/// `debris_spawn_interval(era)` ticks, once the era table starts yielding
/// intervals. The interval is re-read at every spawn, so the rate climbs
/// as the era advances. Never terminates.
#[derive(Debug, Default)]
pub struct DebrisSpawner {
    countdown: u32,
}

impl DebrisSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    fn spawn_one(&mut self, ctx: &mut SimContext) {
        let variant = ctx.rng.random_range(0..ctx.sprites.debris.len());
        let sprite = &ctx.sprites.debris[variant];
        let (rows, cols) = (sprite.rows(), sprite.cols());

        let min_col = ctx.bounds.left();
        let max_col = (ctx.bounds.right() - cols as i32 + 1).max(min_col);
        let col = ctx.rng.random_range(min_col..=max_col);

        let id = ctx.next_entity_id();
        let rect = Rect::new(ctx.bounds.top(), col, rows, cols);
        ctx.obstacles.register(Obstacle { id, rect });
        ctx.spawn(Box::new(DebrisFall::new(
            id,
            variant,
            rect,
            ctx.config.debris_fall_speed,
        )));
        log::debug!("debris {id} (variant {variant}) spawned at column {col}");
    }
}

impl Behavior for DebrisSpawner {
    fn name(&self) -> &'static str {
        "debris-spawner"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        let Some(interval) = debris_spawn_interval(ctx.era) else {
            // before the first threshold era: idle
            return StepResult::Continue;
        };
        if self.countdown > 0 {
            self.countdown -= 1;
        }
        if self.countdown == 0 {
            self.spawn_one(ctx);
            self.countdown = interval;
        }
        StepResult::Continue
    }
}

/// One piece of debris drifting down the screen.
///
/// Owns its obstacle: registered by the spawner before this behavior is
/// created, unregistered here when the debris is destroyed or exits. The
/// consume-check runs first every step, so a collision marked last tick is
/// observed before anything else happens.
pub struct DebrisFall {
    obstacle: ObstacleId,
    variant: usize,
    /// Fractional top row; the obstacle rect tracks its rounded value
    row: f32,
    col: i32,
    speed: f32,
}

impl DebrisFall {
    pub fn new(obstacle: ObstacleId, variant: usize, rect: Rect, speed: f32) -> Self {
        Self {
            obstacle,
            variant,
            row: rect.top as f32,
            col: rect.left,
            speed,
        }
    }
}

impl Behavior for DebrisFall {
    fn name(&self) -> &'static str {
        "debris-fall"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        if ctx.obstacles.consume_collision(self.obstacle) {
            let rect = ctx
                .obstacles
                .get(self.obstacle)
                .expect("debris obstacle missing from registry")
                .rect;
            ctx.obstacles.unregister(self.obstacle);
            ctx.score += DEBRIS_SCORE;
            let (center_row, center_col) = rect.center();
            ctx.spawn(Box::new(ExplosionEffect::new(center_row, center_col)));
            log::debug!("debris {} destroyed, score {}", self.obstacle, ctx.score);
            return StepResult::Finished;
        }

        self.row += self.speed;
        let top = self.row.round() as i32;
        if top > ctx.bounds.bottom() {
            // drifted out the bottom unharmed
            ctx.obstacles.unregister(self.obstacle);
            return StepResult::Finished;
        }

        ctx.obstacles
            .get_mut(self.obstacle)
            .expect("debris obstacle missing from registry")
            .rect
            .top = top;

        ctx.frame
            .draw_sprite(top, self.col, &ctx.sprites.debris[self.variant]);
        StepResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::scheduler::Scheduler;
    use crate::sim::test_support::test_context;

    #[test]
    fn test_interval_table_endpoints() {
        assert_eq!(debris_spawn_interval(1957), None);
        assert_eq!(debris_spawn_interval(1960), None);
        assert_eq!(debris_spawn_interval(1961), Some(20));
        assert_eq!(debris_spawn_interval(1968), Some(20));
        assert_eq!(debris_spawn_interval(1969), Some(14));
        assert_eq!(debris_spawn_interval(1994), Some(10));
        assert_eq!(debris_spawn_interval(2009), Some(8));
        assert_eq!(debris_spawn_interval(2019), Some(6));
        assert_eq!(debris_spawn_interval(2020), Some(2));
        assert_eq!(debris_spawn_interval(2300), Some(2));
    }

    #[test]
    fn test_no_spawns_before_first_threshold_era() {
        let mut ctx = test_context();
        ctx.era = 1957;
        let mut spawner = DebrisSpawner::new();
        for _ in 0..100 {
            spawner.step(&mut ctx);
        }
        assert_eq!(ctx.pending_count(), 0);
        assert!(ctx.obstacles.is_empty());
    }

    #[test]
    fn test_spawn_interval_is_exactly_two_ticks_in_2020() {
        let mut ctx = test_context();
        ctx.era = 2020;
        let mut spawner = DebrisSpawner::new();
        let mut spawn_ticks = Vec::new();
        for tick in 0..10 {
            let before = ctx.obstacles.len();
            spawner.step(&mut ctx);
            if ctx.obstacles.len() > before {
                spawn_ticks.push(tick);
            }
        }
        assert_eq!(spawn_ticks, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_registry_and_fall_behaviors_stay_one_to_one() {
        let mut ctx = test_context();
        ctx.era = 2020;
        let mut scheduler = Scheduler::new();
        scheduler.add(Box::new(DebrisSpawner::new()));

        for _ in 0..30 {
            scheduler.tick(&mut ctx);
            let falls = scheduler
                .names()
                .iter()
                .filter(|name| **name == "debris-fall")
                .count();
            assert_eq!(falls, ctx.obstacles.len());
        }
        assert!(!ctx.obstacles.is_empty());
    }

    #[test]
    fn test_fall_advances_hitbox_with_sprite() {
        let mut ctx = test_context();
        let id = ctx.next_entity_id();
        let rect = Rect::new(1, 5, 2, 3);
        ctx.obstacles.register(Obstacle { id, rect });
        let mut fall = DebrisFall::new(id, 0, rect, 0.6);

        fall.step(&mut ctx);
        assert_eq!(ctx.obstacles.get(id).unwrap().rect.top, 2); // 1.6 rounds up
        fall.step(&mut ctx);
        assert_eq!(ctx.obstacles.get(id).unwrap().rect.top, 2); // 2.2
    }

    #[test]
    fn test_exit_at_bottom_unregisters_without_explosion() {
        let mut ctx = test_context();
        let id = ctx.next_entity_id();
        let bottom = ctx.bounds.bottom();
        let rect = Rect::new(bottom, 5, 2, 3);
        ctx.obstacles.register(Obstacle { id, rect });
        let mut fall = DebrisFall::new(id, 0, rect, 1.0);

        assert_eq!(fall.step(&mut ctx), StepResult::Finished);
        assert!(ctx.obstacles.is_empty());
        assert_eq!(ctx.pending_count(), 0);
        assert_eq!(ctx.score, 0);
    }

    #[test]
    fn test_consumed_collision_explodes_scores_and_unregisters() {
        let mut ctx = test_context();
        let id = ctx.next_entity_id();
        let rect = Rect::new(5, 5, 2, 3);
        ctx.obstacles.register(Obstacle { id, rect });
        ctx.obstacles.mark_collision(id);
        let mut fall = DebrisFall::new(id, 0, rect, 0.2);

        assert_eq!(fall.step(&mut ctx), StepResult::Finished);
        assert!(ctx.obstacles.is_empty());
        assert_eq!(ctx.score, DEBRIS_SCORE);
        assert_eq!(ctx.pending_count(), 1); // the explosion
        // the mark was consumed, not left dangling
        assert!(!ctx.obstacles.consume_collision(id));
    }

    #[test]
    fn test_exactly_one_explosion_per_destroyed_obstacle() {
        let mut ctx = test_context();
        let id = ctx.next_entity_id();
        let rect = Rect::new(5, 5, 2, 3);
        ctx.obstacles.register(Obstacle { id, rect });
        ctx.obstacles.mark_collision(id);
        ctx.obstacles.mark_collision(id); // double mark is idempotent
        let mut fall = DebrisFall::new(id, 0, rect, 0.2);

        fall.step(&mut ctx);
        assert_eq!(ctx.pending_count(), 1);
    }
}
