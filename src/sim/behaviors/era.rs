//! The era clock and its status readout

use crate::render::Intensity;
use crate::sim::context::SimContext;
use crate::sim::scheduler::{Behavior, StepResult};

/// Milestone caption for a year, shown next to the readout while that year
/// is current.
pub fn phrase_for(era: u32) -> Option<&'static str> {
    match era {
        1957 => Some("First Sputnik"),
        1961 => Some("Gagarin flew!"),
        1969 => Some("Armstrong got on the moon!"),
        1971 => Some("First orbital space station Salute-1"),
        1981 => Some("Flight of the Shuttle Columbia"),
        1998 => Some("ISS start building"),
        2011 => Some("Messenger launch to Mercury"),
        2020 => Some("Take the plasma gun! Shoot the garbage!"),
        _ => None,
    }
}

/// Advances `ctx.era` by one every `era_interval_ticks` ticks and draws the
/// year/score readout on the bottom border row. Runs for the whole process
/// lifetime; the era never decreases and nothing else writes it.
#[derive(Debug, Default)]
pub struct EraClock {
    ticks_in_era: u32,
}

impl EraClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Behavior for EraClock {
    fn name(&self) -> &'static str {
        "era-clock"
    }

    fn step(&mut self, ctx: &mut SimContext) -> StepResult {
        self.ticks_in_era += 1;
        if self.ticks_in_era >= ctx.config.era_interval_ticks {
            self.ticks_in_era = 0;
            ctx.era += 1;
            log::debug!("era advanced to {}", ctx.era);
        }

        let mut readout = format!(" Year {}  Score {} ", ctx.era, ctx.score);
        if let Some(phrase) = phrase_for(ctx.era) {
            readout.push_str(phrase);
            readout.push(' ');
        }
        let row = ctx.bounds.rows as i32 - 1;
        let col = (ctx.bounds.cols as i32 - readout.chars().count() as i32) / 2;
        ctx.frame
            .draw_text(row, col.max(0), &readout, Intensity::Bold);

        StepResult::Continue
    }
}
