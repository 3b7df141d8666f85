//! Editor preview driver for the shared animation player
//!
//! The preview ticks on a fixed `1000 / fps` timer and shows source images,
//! where an exported bundle drives the same player with wall-clock deltas
//! over atlas rectangles.

use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::frame;
use crate::models::{CellGrid, GridConfig, ProjectModel, RowMeta};
use crate::runtime::{AnimationPlayer, SoundEvent};

/// Live preview of one grid row.
#[derive(Debug, Default)]
pub struct EditorPreview {
    player: AnimationPlayer<PathBuf>,
    row: Option<usize>,
}

impl EditorPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a row's assigned images and playback settings, rewinding.
    ///
    /// Empty cells and sources that fail to decode are skipped, as the
    /// compositor skips them, so frame `i` matches the exported bundle.
    pub fn load_row(&mut self, project: &ProjectModel, cells: &CellGrid, row: usize) {
        let default_meta = RowMeta::default();
        let meta = project.row_meta(row).unwrap_or(&default_meta);
        let frames: Vec<PathBuf> =
            cells.row_images(row).into_iter().filter(|p| frame::is_readable(p)).collect();
        self.player.configure(
            frames,
            meta.effective_fps(),
            meta.loop_mode,
            meta.sounds.clone(),
        );
        self.row = Some(row);
        log::debug!(
            "Preview row {} ({} frame(s) at {} fps)",
            row,
            self.player.frames().len(),
            self.player.fps()
        );
    }

    /// Row currently loaded.
    pub fn row(&self) -> Option<usize> {
        self.row
    }

    /// Timer interval for the preview clock.
    pub fn interval_ms(&self) -> f64 {
        self.player.interval_ms()
    }

    /// Advance by exactly one timer interval, returning fired sounds.
    pub fn tick(&mut self) -> Vec<SoundEvent> {
        let interval = self.player.interval_ms();
        self.player.advance(interval).events
    }

    pub fn index(&self) -> usize {
        self.player.index()
    }

    /// Source image of the frame on screen.
    pub fn current_path(&self) -> Option<&Path> {
        self.player.current_frame().map(PathBuf::as_path)
    }

    /// Render the current frame as the editor shows it, fitted into `target`.
    pub fn render_current(&self, grid: &GridConfig, target: (u32, u32)) -> Option<RgbaImage> {
        frame::preview_image(self.current_path()?, grid, target)
    }

    pub fn player(&self) -> &AnimationPlayer<PathBuf> {
        &self.player
    }
}
