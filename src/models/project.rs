//! The sheet project and its validation rules

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{GridConfig, RowMeta, TriggerSound, TriggerSounds, MAX_FPS, MIN_FPS};
use super::{MAX_SOURCE_SCALE, MIN_SOURCE_SCALE, TRIGGER_SLOT_COUNT};
use crate::runtime::{LoopMode, SoundBinding};

/// A project that cannot be exported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Sheet name is required")]
    MissingSheetName,
    #[error("Source folder not found: {}", .0.display())]
    SourceFolderNotFound(PathBuf),
    #[error("Grid dimensions must be positive (got {cols}x{rows})")]
    GridDimensions { cols: u32, rows: u32 },
    #[error("Tile size must be positive (got {width}x{height})")]
    TileSize { width: u32, height: u32 },
    #[error("Canvas for a {cols}x{rows} grid exceeds {} pixels per side", u32::MAX)]
    CanvasTooLarge { cols: u32, rows: u32 },
    #[error("Trigger slot {index} is out of range (0-{})", TRIGGER_SLOT_COUNT - 1)]
    TriggerSlot { index: usize },
}

/// A sprite sheet project: naming, grid, per-row playback and trigger sounds.
///
/// Cell placements live beside the project in a [`super::CellGrid`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectModel {
    #[serde(default)]
    pub sheet_name: String,
    /// Folder holding the numbered source frames
    #[serde(default)]
    pub source_folder: PathBuf,
    #[serde(default)]
    pub grid: GridConfig,
    /// Row settings keyed by row index (string keys on disk)
    #[serde(default, with = "row_keys")]
    pub rows_meta: BTreeMap<usize, RowMeta>,
    #[serde(default)]
    pub trigger_sounds: TriggerSounds,
}

impl ProjectModel {
    /// Create a project with default grid and trigger slots.
    pub fn new(sheet_name: impl Into<String>, source_folder: impl Into<PathBuf>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            source_folder: source_folder.into(),
            ..Default::default()
        }
    }

    /// Check everything an export needs before touching the disk.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sheet_name.trim().is_empty() {
            return Err(ValidationError::MissingSheetName);
        }
        if !self.source_folder.is_dir() {
            return Err(ValidationError::SourceFolderNotFound(self.source_folder.clone()));
        }
        if self.grid.cols == 0 || self.grid.rows == 0 {
            return Err(ValidationError::GridDimensions { cols: self.grid.cols, rows: self.grid.rows });
        }
        if self.grid.tile_width == 0 || self.grid.tile_height == 0 {
            return Err(ValidationError::TileSize {
                width: self.grid.tile_width,
                height: self.grid.tile_height,
            });
        }
        if crate::layout::checked_canvas_size(&self.grid).is_none() {
            return Err(ValidationError::CanvasTooLarge { cols: self.grid.cols, rows: self.grid.rows });
        }
        Ok(())
    }

    pub fn set_sheet_name(&mut self, name: impl Into<String>) {
        self.sheet_name = name.into().trim().to_string();
    }

    pub fn set_source_folder(&mut self, folder: impl AsRef<Path>) {
        self.source_folder = folder.as_ref().to_path_buf();
    }

    pub fn set_grid_size(&mut self, cols: u32, rows: u32) {
        self.grid.cols = cols;
        self.grid.rows = rows;
    }

    pub fn set_tile_size(&mut self, width: u32, height: u32) {
        self.grid.tile_width = width;
        self.grid.tile_height = height;
    }

    pub fn set_spacing(&mut self, padding: u32, margin: u32) {
        self.grid.padding = padding;
        self.grid.margin = margin;
    }

    pub fn set_power_of_two(&mut self, enabled: bool) {
        self.grid.power_of_two = enabled;
    }

    /// Enable or disable cropping and move the crop box.
    pub fn set_crop(&mut self, enabled: bool, offset_x: i32, offset_y: i32) {
        self.grid.crop_enabled = enabled;
        self.grid.offset_x = offset_x;
        self.grid.offset_y = offset_y;
    }

    /// Set the source pre-scale in percent, clamped to 10-400.
    pub fn set_source_scale(&mut self, percent: u32) {
        self.grid.source_scale = percent.clamp(MIN_SOURCE_SCALE, MAX_SOURCE_SCALE);
    }

    /// Settings for a row, if any were stored.
    pub fn row_meta(&self, row: usize) -> Option<&RowMeta> {
        self.rows_meta.get(&row)
    }

    /// Settings for a row, creating defaults on first access.
    pub fn row_meta_mut(&mut self, row: usize) -> &mut RowMeta {
        self.rows_meta.entry(row).or_default()
    }

    /// Name of a row as exported.
    pub fn row_display_name(&self, row: usize) -> String {
        match self.row_meta(row) {
            Some(meta) => meta.display_name(row),
            None => super::default_row_name(row),
        }
    }

    pub fn set_row_name(&mut self, row: usize, name: impl Into<String>) {
        self.row_meta_mut(row).name = name.into().trim().to_string();
    }

    /// Set a row's frame rate, clamped to 1-60.
    pub fn set_row_fps(&mut self, row: usize, fps: u32) {
        self.row_meta_mut(row).fps = fps.clamp(MIN_FPS, MAX_FPS);
    }

    pub fn set_row_loop_mode(&mut self, row: usize, loop_mode: LoopMode) {
        self.row_meta_mut(row).loop_mode = loop_mode;
    }

    pub fn add_row_sound(&mut self, row: usize, sound: SoundBinding) {
        self.row_meta_mut(row).sounds.push(sound);
    }

    /// Remove a row's sound by position.
    pub fn remove_row_sound(&mut self, row: usize, index: usize) -> Option<SoundBinding> {
        let sounds = &mut self.rows_meta.get_mut(&row)?.sounds;
        (index < sounds.len()).then(|| sounds.remove(index))
    }

    /// Assign a sound to engine trigger slot `index` (0-15).
    pub fn set_trigger_sound(
        &mut self,
        index: usize,
        file: impl Into<String>,
        volume: f32,
    ) -> Result<(), ValidationError> {
        let slot = self.trigger_sounds.get_mut(index).ok_or(ValidationError::TriggerSlot { index })?;
        *slot = TriggerSound::new(file, volume);
        Ok(())
    }

    /// Empty a trigger slot.
    pub fn clear_trigger_sound(&mut self, index: usize) -> Result<(), ValidationError> {
        let slot = self.trigger_sounds.get_mut(index).ok_or(ValidationError::TriggerSlot { index })?;
        *slot = TriggerSound::default();
        Ok(())
    }

    /// Take grid and row settings from another project, keeping this
    /// project's name, source folder and trigger sounds.
    pub fn apply_settings(&mut self, settings: &ProjectModel) {
        self.grid = settings.grid.clone();
        self.rows_meta = settings.rows_meta.clone();
    }
}

/// Row settings are stored under string keys; keys that are not row
/// indices are dropped on load.
mod row_keys {
    use super::RowMeta;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::BTreeMap;

    pub fn serialize<S: Serializer>(
        rows: &BTreeMap<usize, RowMeta>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_map(rows.iter().map(|(k, v)| (k.to_string(), v)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<usize, RowMeta>, D::Error> {
        let raw: Option<BTreeMap<String, RowMeta>> = Option::deserialize(deserializer)?;
        Ok(raw
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(k, v)| k.trim().parse::<usize>().ok().map(|k| (k, v)))
            .collect())
    }
}
