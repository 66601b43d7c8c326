//! ASCII sprite loading
//!
//! Sprites are multi-line text blocks read once at startup from
//! `assets/<category>/*.txt`, in filename order. A missing directory or an
//! empty category is fatal: the game cannot draw entities it has no art for.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Startup failure while loading sprite assets.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("sprite category '{0}' has no frames")]
    EmptyCategory(&'static str),
    #[error("sprite file {0} is blank")]
    BlankSprite(PathBuf),
}

/// An immutable multi-line sprite with its bounding box.
///
/// `cols` is the longest line; shorter lines are padded implicitly by the
/// renderer skipping absent cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    lines: Vec<String>,
    rows: u16,
    cols: u16,
}

impl Sprite {
    /// Parse a sprite from its text block.
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.lines().map(str::to_owned).collect();
        let rows = lines.len() as u16;
        let cols = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as u16;
        Self { lines, rows, cols }
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.trim().is_empty())
    }

    /// Lines of the sprite, top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

/// All sprite frames the game draws, loaded once at startup.
#[derive(Debug, Clone)]
pub struct SpriteSet {
    /// Ship animation frames, cycled by the ship animator
    pub ship: Vec<Sprite>,
    /// Debris variants, picked at random per spawn
    pub debris: Vec<Sprite>,
    /// Explosion animation frames, played once per destroyed debris
    pub explosion: Vec<Sprite>,
    /// Game-over banners, one picked at random per run
    pub gameover: Vec<Sprite>,
}

impl SpriteSet {
    /// Load every category from `dir`. Any failure here aborts startup.
    pub fn load(dir: &Path) -> Result<Self, SpriteError> {
        let set = Self {
            ship: load_category(dir, "ship")?,
            debris: load_category(dir, "debris")?,
            explosion: load_category(dir, "explosion")?,
            gameover: load_category(dir, "gameover")?,
        };
        log::info!(
            "loaded sprites: {} ship, {} debris, {} explosion, {} gameover",
            set.ship.len(),
            set.debris.len(),
            set.explosion.len(),
            set.gameover.len()
        );
        Ok(set)
    }
}

/// Read every `*.txt` under `dir/<category>`, sorted by filename.
fn load_category(dir: &Path, category: &'static str) -> Result<Vec<Sprite>, SpriteError> {
    let category_dir = dir.join(category);
    let entries = fs::read_dir(&category_dir).map_err(|source| SpriteError::Io {
        path: category_dir.clone(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let text = fs::read_to_string(&path).map_err(|source| SpriteError::Io {
            path: path.clone(),
            source,
        })?;
        let sprite = Sprite::from_text(&text);
        if sprite.is_blank() {
            return Err(SpriteError::BlankSprite(path));
        }
        frames.push(sprite);
    }

    if frames.is_empty() {
        return Err(SpriteError::EmptyCategory(category));
    }
    Ok(frames)
}
