//! Info command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::layout::canvas_size;
use crate::models::{LoopMode, DEFAULT_FPS};
use crate::project::load_project;

use super::{EXIT_ERROR, EXIT_SUCCESS};

/// Execute the info command
pub fn run_info(path: &Path) -> ExitCode {
    let loaded = match load_project(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let project = &loaded.project;
    let grid = &project.grid;
    let (width, height) = canvas_size(grid);

    println!("Sheet:   {}", project.sheet_name);
    println!("Source:  {}", project.source_folder.display());
    println!(
        "Grid:    {}x{} cells of {}x{} (padding {}, margin {})",
        grid.cols, grid.rows, grid.tile_width, grid.tile_height, grid.padding, grid.margin
    );
    println!("Canvas:  {}x{}", width, height);
    if grid.crop_enabled {
        println!("Crop:    offset ({}, {})", grid.offset_x, grid.offset_y);
    }
    println!("Scale:   {}%", grid.effective_source_scale());
    println!();

    for row in 0..grid.rows as usize {
        let (fps, loop_mode, sounds) = match project.row_meta(row) {
            Some(meta) => (meta.effective_fps(), meta.loop_mode, meta.sounds.len()),
            None => (DEFAULT_FPS, LoopMode::default(), 0),
        };
        println!(
            "  {:<12} {:>2} frame(s)  {:>2} fps  {:<8}  {} sound(s)",
            project.row_display_name(row),
            loaded.cells.row_images(row).len(),
            fps,
            loop_mode.as_str(),
            sounds
        );
    }
    println!();
    println!(
        "Trigger sounds: {} of {} assigned",
        project.trigger_sounds.assigned(),
        project.trigger_sounds.len()
    );

    if let Err(e) = project.validate() {
        println!("Not exportable: {}", e);
    }
    ExitCode::from(EXIT_SUCCESS)
}
