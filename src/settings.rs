//! Game settings
//!
//! Every tuning knob the simulation reads, loadable from a JSON file next
//! to the binary so a run can be reconfigured without rebuilding.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SimConfig;

/// Game settings/preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tick interval in milliseconds
    pub tick_ms: u64,
    /// Stars scattered at startup
    pub star_count: usize,
    /// RNG seed; None derives one from the clock at startup
    pub seed: Option<u64>,
    /// Year the simulation starts in
    pub start_era: u32,
    /// Ticks per simulated year
    pub era_interval_ticks: u32,
    /// Year the plasma gun unlocks
    pub weapon_unlock_era: u32,
    /// Debris fall speed in rows per tick
    pub debris_fall_speed: f32,
    /// Projectile speed in rows per tick
    pub projectile_speed: f32,
    /// Directory holding the sprite categories
    pub assets_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: TICK_MS,
            star_count: STAR_COUNT,
            seed: None,
            start_era: START_ERA,
            era_interval_ticks: ERA_INTERVAL_TICKS,
            weapon_unlock_era: WEAPON_UNLOCK_ERA,
            debris_fall_speed: DEBRIS_FALL_SPEED,
            projectile_speed: PROJECTILE_SPEED,
            assets_dir: PathBuf::from("assets"),
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// absent or unparsable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("ignoring malformed {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write the current settings out as pretty JSON.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).expect("settings always serialize");
        fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// The subset the simulation layer consumes.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            era_interval_ticks: self.era_interval_ticks,
            weapon_unlock_era: self.weapon_unlock_era,
            debris_fall_speed: self.debris_fall_speed,
            projectile_speed: self.projectile_speed,
        }
    }
}
