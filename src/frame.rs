//! Per-frame transforms - source pre-scale, crop and fit-to-tile

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::Path;

use crate::models::GridConfig;

/// Resampling filter for every scale step.
const FILTER: FilterType = FilterType::Triangle;

/// Largest size with the aspect ratio of `(width, height)` that fits in
/// `(max_width, max_height)`. Each side is at least 1.
pub fn fit_size(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (max_width.max(1), max_height.max(1));
    }
    let (w, h) = (u64::from(width), u64::from(height));
    let (max_w, max_h) = (u64::from(max_width), u64::from(max_height));
    let scaled_w = max_h * w / h;
    let (out_w, out_h) = if scaled_w <= max_w { (scaled_w, max_h) } else { (max_w, max_w * h / w) };
    (clamp_side(out_w), clamp_side(out_h))
}

fn clamp_side(value: u64) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX).max(1)
}

/// Size of a source after the uniform pre-scale.
pub fn scaled_source_size(width: u32, height: u32, grid: &GridConfig) -> (u32, u32) {
    let scale = f64::from(grid.effective_source_scale()) / 100.0;
    let target_w = ((f64::from(width) * scale) as u32).max(1);
    let target_h = ((f64::from(height) * scale) as u32).max(1);
    fit_size(width, height, target_w, target_h)
}

/// Region extracted from a pre-scaled source when cropping is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Clamp the crop offsets into the source and size the region to at most
/// one tile.
pub fn crop_region(width: u32, height: u32, grid: &GridConfig) -> CropRegion {
    let x = clamp_offset(grid.offset_x, width);
    let y = clamp_offset(grid.offset_y, height);
    let avail_w = width.saturating_sub(x);
    let avail_h = height.saturating_sub(y);
    CropRegion {
        x,
        y,
        width: grid.tile_width.min(avail_w).max(1),
        height: grid.tile_height.min(avail_h).max(1),
    }
}

fn clamp_offset(offset: i32, dim: u32) -> u32 {
    let max = i64::from(dim.saturating_sub(1));
    i64::from(offset).clamp(0, max) as u32
}

fn resize_to(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        image.clone()
    } else {
        imageops::resize(image, width, height, FILTER)
    }
}

/// Pre-scale a decoded source, then crop or fit it into the tile.
///
/// The result is at most tile-sized and may be smaller on one axis.
pub fn transform_image(source: &RgbaImage, grid: &GridConfig) -> RgbaImage {
    let (sw, sh) = scaled_source_size(source.width(), source.height(), grid);
    let scaled = resize_to(source, sw, sh);
    let (tile_w, tile_h) = grid.tile_size();

    if grid.crop_enabled {
        let region = crop_region(sw, sh, grid);
        let cropped = imageops::crop_imm(&scaled, region.x, region.y, region.width, region.height)
            .to_image();
        if cropped.dimensions() == (tile_w, tile_h) {
            return cropped;
        }
        let (fw, fh) = fit_size(cropped.width(), cropped.height(), tile_w, tile_h);
        return resize_to(&cropped, fw, fh);
    }

    let (fw, fh) = fit_size(sw, sh, tile_w, tile_h);
    resize_to(&scaled, fw, fh)
}

fn decode(path: &Path) -> Option<RgbaImage> {
    match image::open(path) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            log::warn!("Skipping unreadable frame {}: {}", path.display(), e);
            None
        }
    }
}

/// Whether a cell's source decodes, the same test the compositor applies.
pub fn is_readable(path: &Path) -> bool {
    decode(path).is_some()
}

/// Decode and transform one cell's source. Unreadable sources yield `None`.
pub fn load_frame(path: &Path, grid: &GridConfig) -> Option<RgbaImage> {
    decode(path).map(|source| transform_image(&source, grid))
}

/// Thumbnail of a source as the editor previews it: pre-scale, optional
/// crop, then fit into `target`.
pub fn preview_image(path: &Path, grid: &GridConfig, target: (u32, u32)) -> Option<RgbaImage> {
    let source = decode(path)?;
    let (sw, sh) = scaled_source_size(source.width(), source.height(), grid);
    let mut image = resize_to(&source, sw, sh);
    if grid.crop_enabled {
        let region = crop_region(sw, sh, grid);
        image = imageops::crop_imm(&image, region.x, region.y, region.width, region.height)
            .to_image();
    }
    let (fw, fh) = fit_size(image.width(), image.height(), target.0.max(1), target.1.max(1));
    Some(resize_to(&image, fw, fh))
}
