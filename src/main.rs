//! Kessler entry point
//!
//! Wires the collaborators together: settings, sprites, terminal, input,
//! and the initial behavior roster, then hands control to the tick loop.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, bail};
use rand::Rng;

use kessler::consts::{BORDER, STAR_GLYPHS};
use kessler::input::CrosstermInput;
use kessler::render::TerminalScreen;
use kessler::sim::behaviors::{DebrisSpawner, EraClock, ShipAnimator, ShipControl, StarBlink};
use kessler::sim::{Bounds, Scheduler, SimContext, run};
use kessler::{Settings, SpriteSet};

const SETTINGS_PATH: &str = "kessler.json";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::load(Path::new(SETTINGS_PATH));
    let sprites = SpriteSet::load(&settings.assets_dir).context("loading sprites")?;

    let (cols, rows) = crossterm::terminal::size().context("querying terminal size")?;
    let tallest = sprites
        .ship
        .iter()
        .chain(&sprites.debris)
        .map(|s| s.rows())
        .max()
        .unwrap_or(0);
    if rows < tallest + 2 * BORDER + 2 || cols < 20 {
        bail!("terminal too small ({cols}x{rows}); need at least 20 columns and {} rows",
            tallest + 2 * BORDER + 2);
    }

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!(
        "starting run: {cols}x{rows} cells, seed {seed}, tick {}ms, year {}",
        settings.tick_ms,
        settings.start_era
    );

    let bounds = Bounds::new(rows, cols);
    let mut ctx = SimContext::new(
        bounds,
        settings.sim_config(),
        sprites,
        seed,
        settings.start_era,
    );

    let mut scheduler = Scheduler::new();
    scheduler.add(Box::new(ShipControl::at_launch_pad(&ctx)));
    scheduler.add(Box::new(ShipAnimator::new()));
    scheduler.add(Box::new(DebrisSpawner::new()));
    scheduler.add(Box::new(EraClock::new()));
    for _ in 0..settings.star_count {
        let row = ctx.rng.random_range(bounds.top()..=bounds.bottom());
        let col = ctx.rng.random_range(bounds.left()..=bounds.right());
        let glyph = STAR_GLYPHS[ctx.rng.random_range(0..STAR_GLYPHS.len())];
        let star = StarBlink::new(row, col, glyph, &mut ctx.rng);
        scheduler.add(Box::new(star));
    }

    let mut screen = TerminalScreen::enter().context("entering raw terminal mode")?;
    let mut input = CrosstermInput;
    let result = run(
        &mut scheduler,
        &mut ctx,
        &mut input,
        |ctx| screen.present(&ctx.frame),
        settings.tick_interval(),
    );
    screen.leave().ok();
    result.context("tick loop failed")?;

    log::info!(
        "run over: {} ticks, year {}, score {}",
        ctx.tick,
        ctx.era,
        ctx.score
    );
    println!("Final score: {} (year {})", ctx.score, ctx.era);
    Ok(())
}
