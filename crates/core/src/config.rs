//! Session configuration
//!
//! Everything a [`crate::GameSession`] needs to build a board: dimensions,
//! the tile catalog with its counts, the seed, and optionally a fixed layout
//! and start position for reproducible games. Configurations are plain serde
//! structs; JSON files may leave out any field to keep its standard value.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::MazeError;
use crate::tileset::TileSet;
use crate::types::{KindId, Pos, DEFAULT_BOARD_SIZE, DEFAULT_VIEW_SIZE, SLIDE_INTERVAL_MS};

/// Path of a JSON configuration file.
pub const CONFIG_ENV: &str = "MAZE_CONFIG";
/// Seed override.
pub const SEED_ENV: &str = "MAZE_SEED";
/// Slide interval override, in milliseconds.
pub const SLIDE_INTERVAL_ENV: &str = "MAZE_SLIDE_INTERVAL_MS";

/// Tile catalog as it appears in a config file.
///
/// Door patterns use `0`/`1` per slot, clockwise from north.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSetConfig {
    pub name: String,
    pub doors: BTreeMap<u16, [u8; 4]>,
    pub counts: BTreeMap<u16, u32>,
}

impl TileSetConfig {
    pub fn standard() -> Self {
        let set = TileSet::standard();
        Self {
            name: set.name().to_string(),
            doors: set
                .kinds()
                .map(|k| (k.id.0, k.doors.map(u8::from)))
                .collect(),
            counts: set.counts().map(|(id, n)| (id.0, n)).collect(),
        }
    }

    /// Build the catalog, checking that every counted kind has doors.
    pub fn build(&self) -> Result<TileSet, MazeError> {
        TileSet::new(
            self.name.clone(),
            self.doors
                .iter()
                .map(|(&id, pattern)| (KindId(id), pattern.map(|d| d != 0))),
            self.counts.iter().map(|(&id, &n)| (KindId(id), n)),
        )
    }
}

impl Default for TileSetConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    pub board_width: u16,
    pub board_height: u16,
    pub view_width: u16,
    pub view_height: u16,
    pub seed: u32,
    /// Time between random line slides; 0 disables them.
    pub slide_interval_ms: u32,
    pub tile_set: TileSetConfig,
    /// Fixed kind ids, row-major, all unrotated. Replaces the random deal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<Vec<u16>>,
    /// Player start as `[x, y]`; the board center if absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<[i32; 2]>,
}

impl MazeConfig {
    /// 7x7 board, 5x5 window, classic five-kind tile set.
    pub fn standard() -> Self {
        Self {
            board_width: DEFAULT_BOARD_SIZE,
            board_height: DEFAULT_BOARD_SIZE,
            view_width: DEFAULT_VIEW_SIZE,
            view_height: DEFAULT_VIEW_SIZE,
            seed: 1,
            slide_interval_ms: SLIDE_INTERVAL_MS,
            tile_set: TileSetConfig::standard(),
            layout: None,
            start: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, MazeError> {
        serde_json::from_str(json).map_err(|e| MazeError::Config(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MazeError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| MazeError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, MazeError> {
        serde_json::to_string_pretty(self).map_err(|e| MazeError::Config(e.to_string()))
    }

    /// Standard config (or the file named by `MAZE_CONFIG`) with the seed and
    /// slide interval taken from the environment when they parse.
    pub fn from_env() -> Result<Self, MazeError> {
        let var = |name: &str| env::var(name).ok();
        Self::from_sources(
            var(CONFIG_ENV).as_deref(),
            var(SEED_ENV).as_deref(),
            var(SLIDE_INTERVAL_ENV).as_deref(),
        )
    }

    /// [`MazeConfig::from_env`] with the raw variable values passed in.
    pub fn from_sources(
        path: Option<&str>,
        seed: Option<&str>,
        slide_interval_ms: Option<&str>,
    ) -> Result<Self, MazeError> {
        let config = match path {
            Some(path) if !path.is_empty() => Self::load(path)?,
            _ => Self::standard(),
        };
        Ok(config.apply_overrides(seed, slide_interval_ms))
    }

    /// Replace the seed and slide interval with any values that parse.
    pub fn apply_overrides(mut self, seed: Option<&str>, slide_interval_ms: Option<&str>) -> Self {
        self.seed = parse_override(SEED_ENV, seed).unwrap_or(self.seed);
        self.slide_interval_ms =
            parse_override(SLIDE_INTERVAL_ENV, slide_interval_ms).unwrap_or(self.slide_interval_ms);
        self
    }

    /// Check that a session can actually be built from this config.
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.board_width,
                height: self.board_height,
            });
        }
        if self.view_width == 0 || self.view_height == 0 {
            return Err(MazeError::InvalidDimensions {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if self.view_width > self.board_width || self.view_height > self.board_height {
            return Err(MazeError::ViewportTooLarge {
                view_width: self.view_width,
                view_height: self.view_height,
                board_width: self.board_width,
                board_height: self.board_height,
            });
        }

        let tiles = self.tile_set.build()?;
        let cells = self.board_cells();
        match &self.layout {
            Some(layout) => {
                if layout.len() != cells {
                    return Err(MazeError::DimensionMismatch {
                        expected: cells,
                        actual: layout.len(),
                    });
                }
                if let Some(&bad) = layout.iter().find(|&&id| !tiles.contains(KindId(id))) {
                    return Err(MazeError::UnknownKind(KindId(bad)));
                }
            }
            None => {
                // Every cell is dealt from the bag, and a slide needs one more.
                if tiles.total_count() < cells + 1 {
                    return Err(MazeError::Config(format!(
                        "tile set '{}' holds {} tiles, board needs at least {}",
                        tiles.name(),
                        tiles.total_count(),
                        cells + 1
                    )));
                }
            }
        }

        let start = self.start_pos();
        if start.x < 0
            || start.y < 0
            || start.x >= self.board_width as i32
            || start.y >= self.board_height as i32
        {
            return Err(MazeError::InvalidStart { pos: start });
        }
        Ok(())
    }

    pub fn board_cells(&self) -> usize {
        self.board_width as usize * self.board_height as usize
    }

    /// Configured start, or the center cell.
    pub fn start_pos(&self) -> Pos {
        match self.start {
            Some([x, y]) => Pos::new(x, y),
            None => Pos::new(
                (self.board_width / 2) as i32,
                (self.board_height / 2) as i32,
            ),
        }
    }

    pub fn layout_kinds(&self) -> Option<Vec<KindId>> {
        self.layout
            .as_ref()
            .map(|l| l.iter().copied().map(KindId).collect())
    }
}

fn parse_override(name: &str, raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(var = name, value = raw, "ignoring unparsable override");
            None
        }
    }
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self::standard()
    }
}
