//! Background star twinkle

use rand::Rng;
use rand_pcg::Pcg32;

use crate::consts::STAR_MAX_DELAY;
use crate::render::Intensity;
use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// Phases of one blink cycle, in order. The delay phase staggers the stars
/// so the field does not pulse in unison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Delay,
    Dim,
    NormalAfterDim,
    Bold,
    NormalAfterBold,
}

impl Phase {
    fn next(self) -> Phase {
        match self {
            Phase::Delay => Phase::Dim,
            Phase::Dim => Phase::NormalAfterDim,
            Phase::NormalAfterDim => Phase::Bold,
            Phase::Bold => Phase::NormalAfterBold,
            Phase::NormalAfterBold => Phase::Delay,
        }
    }

    /// Ticks the phase holds. The delay is re-rolled every cycle.
    fn duration(self, rng: &mut Pcg32) -> u32 {
        match self {
            Phase::Delay => rng.random_range(0..=STAR_MAX_DELAY),
            Phase::Dim => 20,
            Phase::NormalAfterDim => 3,
            Phase::Bold => 5,
            Phase::NormalAfterBold => 3,
        }
    }

    fn intensity(self) -> Intensity {
        match self {
            Phase::Dim => Intensity::Dim,
            Phase::Bold => Intensity::Bold,
            _ => Intensity::Normal,
        }
    }
}

/// One star's infinite brightness cycle. Purely cosmetic.
pub struct StarBlink {
    row: i32,
    col: i32,
    glyph: char,
    phase: Phase,
    remaining: u32,
}

impl StarBlink {
    pub fn new(row: i32, col: i32, glyph: char, rng: &mut Pcg32) -> Self {
        Self {
            row,
            col,
            glyph,
            phase: Phase::Delay,
            remaining: Phase::Delay.duration(rng),
        }
    }
}

impl Behavior for StarBlink {
    fn name(&self) -> &'static str {
        "star-blink"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        // a zero-length delay roll advances straight into the dim phase
        while self.remaining == 0 {
            self.phase = self.phase.next();
            self.remaining = self.phase.duration(&mut ctx.rng);
        }
        self.remaining -= 1;
        ctx.frame
            .put(self.row, self.col, self.glyph, self.phase.intensity());
        StepResult::Continue
    }
}
