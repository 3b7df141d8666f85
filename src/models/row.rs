//! Per-row playback settings

use serde::{Deserialize, Serialize};

use crate::runtime::{LoopMode, SoundBinding};

/// Slowest row frame rate.
pub const MIN_FPS: u32 = 1;
/// Fastest row frame rate.
pub const MAX_FPS: u32 = 60;
/// Frame rate used for rows without settings.
pub const DEFAULT_FPS: u32 = 6;

/// Playback settings for one grid row (one animation clip).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowMeta {
    /// Display name; empty means `row_<index>`
    pub name: String,
    pub fps: u32,
    pub loop_mode: LoopMode,
    pub sounds: Vec<SoundBinding>,
}

impl Default for RowMeta {
    fn default() -> Self {
        Self { name: String::new(), fps: DEFAULT_FPS, loop_mode: LoopMode::Pingpong, sounds: vec![] }
    }
}

impl RowMeta {
    /// Frame rate clamped to 1-60.
    pub fn effective_fps(&self) -> u32 {
        self.fps.clamp(MIN_FPS, MAX_FPS)
    }

    /// Name to show for row `index`.
    pub fn display_name(&self, index: usize) -> String {
        if self.name.is_empty() {
            default_row_name(index)
        } else {
            self.name.clone()
        }
    }
}

/// Name given to rows that have none.
pub fn default_row_name(index: usize) -> String {
    format!("row_{}", index)
}
