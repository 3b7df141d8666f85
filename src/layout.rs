//! Grid layout planning - canvas size and per-cell rectangles

use crate::models::{FrameRect, GridConfig};

/// Canvas size for a grid as `(width, height)`.
///
/// `power_of_two` is metadata only and never rounds the canvas up.
/// Saturates at `u32::MAX`; see [`checked_canvas_size`].
pub fn canvas_size(grid: &GridConfig) -> (u32, u32) {
    (
        span(grid.margin, grid.cols, grid.tile_width, grid.padding),
        span(grid.margin, grid.rows, grid.tile_height, grid.padding),
    )
}

/// Canvas size, or `None` when either side overflows `u32`.
pub fn checked_canvas_size(grid: &GridConfig) -> Option<(u32, u32)> {
    Some((
        checked_span(grid.margin, grid.cols, grid.tile_width, grid.padding)?,
        checked_span(grid.margin, grid.rows, grid.tile_height, grid.padding)?,
    ))
}

fn span(margin: u32, count: u32, tile: u32, padding: u32) -> u32 {
    margin
        .saturating_mul(2)
        .saturating_add(count.saturating_mul(tile))
        .saturating_add(count.saturating_sub(1).saturating_mul(padding))
}

fn checked_span(margin: u32, count: u32, tile: u32, padding: u32) -> Option<u32> {
    margin
        .checked_mul(2)?
        .checked_add(count.checked_mul(tile)?)?
        .checked_add(count.saturating_sub(1).checked_mul(padding)?)
}

/// Atlas-space rectangle of the cell at `(row, col)`.
pub fn cell_rect(grid: &GridConfig, row: u32, col: u32) -> FrameRect {
    FrameRect::new(
        grid.margin.saturating_add(col.saturating_mul(grid.tile_width.saturating_add(grid.padding))),
        grid.margin.saturating_add(row.saturating_mul(grid.tile_height.saturating_add(grid.padding))),
        grid.tile_width,
        grid.tile_height,
    )
}
