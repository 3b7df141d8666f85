//! Grid configuration and atlas rectangles

use serde::{Deserialize, Serialize};

/// Smallest accepted source pre-scale, in percent.
pub const MIN_SOURCE_SCALE: u32 = 10;
/// Largest accepted source pre-scale, in percent.
pub const MAX_SOURCE_SCALE: u32 = 400;

/// Layout and per-frame transform settings for a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    /// Gap between neighboring cells
    pub padding: u32,
    /// Border around the whole sheet
    pub margin: u32,
    /// Recorded in metadata only; the canvas is never rounded up
    pub power_of_two: bool,
    pub crop_enabled: bool,
    /// Top-left X of the crop box, clamped into the source at use time
    pub offset_x: i32,
    /// Top-left Y of the crop box, clamped into the source at use time
    pub offset_y: i32,
    /// Source pre-scale in percent (10-400)
    pub source_scale: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 4,
            rows: 4,
            tile_width: 64,
            tile_height: 64,
            padding: 0,
            margin: 0,
            power_of_two: true,
            crop_enabled: false,
            offset_x: 0,
            offset_y: 0,
            source_scale: 100,
        }
    }
}

impl GridConfig {
    /// Source scale clamped into the accepted range.
    pub fn effective_source_scale(&self) -> u32 {
        self.source_scale.clamp(MIN_SOURCE_SCALE, MAX_SOURCE_SCALE)
    }

    /// Tile size as `(width, height)`.
    pub fn tile_size(&self) -> (u32, u32) {
        (self.tile_width, self.tile_height)
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// A frame's rectangle in atlas space.
///
/// Serialized as `[x, y, width, height]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FrameRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn to_array(self) -> [u32; 4] {
        [self.x, self.y, self.width, self.height]
    }
}

impl From<[u32; 4]> for FrameRect {
    fn from([x, y, width, height]: [u32; 4]) -> Self {
        Self { x, y, width, height }
    }
}

impl From<FrameRect> for [u32; 4] {
    fn from(rect: FrameRect) -> Self {
        rect.to_array()
    }
}
