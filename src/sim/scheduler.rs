//! Cooperative tick scheduler
//!
//! The scheduler owns the ordered collection of active behaviors. Each tick
//! it steps every behavior exactly once, in order, removes the ones that
//! report completion, and only then folds in behaviors spawned during the
//! tick, so a behavior spawned this tick is first stepped next tick.
//!
//! Behaviors are stepped strictly sequentially; one step finishes before
//! the next starts. A panic inside a step is a programming error and takes
//! the whole loop down: there is nothing useful to salvage in a
//! single-player process with half-updated state.

use std::io;
use std::thread;
use std::time::Duration;

use crate::input::InputSource;
use crate::sim::context::SimContext;

/// What a behavior reports after one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Resume again next tick
    Continue,
    /// Remove from the active collection
    Finished,
}

/// An independently resumable unit of simulation logic.
///
/// One `step` call covers exactly one tick's worth of work; the only
/// suspension point is returning to the scheduler.
pub trait Behavior {
    fn name(&self) -> &'static str;
    fn step(&mut self, ctx: &mut SimContext) -> StepResult;
}

/// Ordered collection of active behaviors, stepped once per tick.
#[derive(Default)]
pub struct Scheduler {
    behaviors: Vec<Box<dyn Behavior>>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a behavior directly. Only valid between ticks; behaviors spawned
    /// mid-tick go through `SimContext::spawn` instead.
    pub fn add(&mut self, behavior: Box<dyn Behavior>) {
        self.behaviors.push(behavior);
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }

    /// Names of the active behaviors, in step order.
    pub fn names(&self) -> Vec<&'static str> {
        self.behaviors.iter().map(|b| b.name()).collect()
    }

    /// Advance the simulation by one tick: compose a fresh frame, step
    /// every active behavior once, drop the finished, fold in the spawned.
    pub fn tick(&mut self, ctx: &mut SimContext) {
        ctx.frame.clear();
        ctx.frame.draw_border();

        self.behaviors.retain_mut(|behavior| {
            match behavior.step(ctx) {
                StepResult::Continue => true,
                StepResult::Finished => {
                    log::debug!("behavior '{}' finished", behavior.name());
                    false
                }
            }
        });

        // Tick boundary: spawned-this-tick behaviors join now and are first
        // stepped next tick.
        self.behaviors.extend(ctx.take_pending());

        ctx.tick += 1;
        ctx.input = Default::default();
    }
}

/// Drive the scheduler until the player quits: poll input, tick, present
/// the composed frame, sleep the fixed tick interval.
pub fn run<I, P>(
    scheduler: &mut Scheduler,
    ctx: &mut SimContext,
    input: &mut I,
    mut present: P,
    tick_interval: Duration,
) -> io::Result<()>
where
    I: InputSource,
    P: FnMut(&SimContext) -> io::Result<()>,
{
    loop {
        let state = input.poll()?;
        if state.quit {
            log::info!("quit requested at tick {}", ctx.tick);
            return Ok(());
        }
        ctx.input = state;
        scheduler.tick(ctx);
        present(ctx)?;
        thread::sleep(tick_interval);
    }
}
