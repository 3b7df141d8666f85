//! Atlas compositing - draws transformed frames onto the sheet canvas
//!
//! Cells are scanned row-major. Only cells that produced an image get a
//! frame rectangle, so frame `i` of a row is its i-th rendered cell.

use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

use crate::frame;
use crate::layout::{canvas_size, cell_rect};
use crate::models::{CellGrid, FrameRect, GridConfig};

/// Transparent color for atlas background
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// An assigned cell whose source could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedCell {
    pub row: usize,
    pub col: usize,
    pub path: PathBuf,
}

/// Result of compositing a sheet.
#[derive(Debug)]
pub struct Composite {
    pub image: RgbaImage,
    /// Frame rectangles per grid row, in column order
    pub rows: Vec<Vec<FrameRect>>,
    pub skipped: Vec<SkippedCell>,
}

impl Composite {
    /// Number of frames drawn across all rows.
    pub fn frame_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Composite every assigned cell, decoding sources from disk.
pub fn compose(grid: &GridConfig, cells: &CellGrid) -> Composite {
    compose_with(grid, cells, |path| frame::load_frame(path, grid))
}

/// Composite with a custom frame source.
///
/// `load` returns the already-transformed tile image for a path, or `None`
/// to skip the cell.
pub fn compose_with<F>(grid: &GridConfig, cells: &CellGrid, mut load: F) -> Composite
where
    F: FnMut(&Path) -> Option<RgbaImage>,
{
    let (width, height) = canvas_size(grid);
    let mut image = RgbaImage::from_pixel(width, height, TRANSPARENT);
    let mut rows = Vec::with_capacity(grid.rows as usize);
    let mut skipped = Vec::new();

    for r in 0..grid.rows {
        let mut rects = Vec::new();
        for c in 0..grid.cols {
            let Some(path) = cells.get(r as usize, c as usize) else {
                continue;
            };
            let Some(tile) = load(path) else {
                skipped.push(SkippedCell { row: r as usize, col: c as usize, path: path.to_path_buf() });
                continue;
            };
            let rect = cell_rect(grid, r, c);
            let dx = rect.x + grid.tile_width.saturating_sub(tile.width()) / 2;
            let dy = rect.y + grid.tile_height.saturating_sub(tile.height()) / 2;
            copy_tile_to_atlas(&mut image, &tile, dx, dy);
            rects.push(rect);
        }
        log::debug!("Row {}: {} frame(s)", r, rects.len());
        rows.push(rects);
    }

    Composite { image, rows, skipped }
}

/// Copy a tile onto the canvas at (x, y), clipping at the canvas edge.
fn copy_tile_to_atlas(atlas: &mut RgbaImage, tile: &RgbaImage, x: u32, y: u32) {
    for ty in 0..tile.height() {
        for tx in 0..tile.width() {
            let pixel = *tile.get_pixel(tx, ty);
            if x + tx < atlas.width() && y + ty < atlas.height() {
                atlas.put_pixel(x + tx, y + ty, pixel);
            }
        }
    }
}
