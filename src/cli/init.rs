//! Init command implementation

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::models::{CellGrid, ProjectModel};
use crate::project::{list_source_images, save_project};

use super::{resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the init command
pub fn run_init(
    source_folder: &Path,
    name: &str,
    output: Option<&Path>,
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> ExitCode {
    let name = name.trim();
    if name.is_empty() {
        eprintln!("Error: --name must not be empty");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }
    if !source_folder.is_dir() {
        eprintln!("Error: Source folder not found: {}", source_folder.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let config = match resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let mut project = ProjectModel::new(name, source_folder);
    project.grid = config.grid.to_grid();
    for row in 0..project.grid.rows as usize {
        project.set_row_fps(row, config.rows.fps);
        project.set_row_loop_mode(row, config.rows.loop_mode);
    }

    let images = match list_source_images(source_folder) {
        Ok(images) => images,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let mut cells = CellGrid::for_grid(&project.grid);
    let placed = cells.fill_sequential(&images);

    let output =
        output.map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from(format!("{}.json", name)));
    if let Err(e) = save_project(&output, &project, Some(&cells)) {
        eprintln!("Error: {}", e);
        return ExitCode::from(EXIT_ERROR);
    }

    println!(
        "Created {} ({}x{} grid, {} of {} frame(s) assigned)",
        output.display(),
        project.grid.cols,
        project.grid.rows,
        placed,
        images.len()
    );
    if placed < images.len() {
        eprintln!("Warning: {} frame(s) did not fit in the grid", images.len() - placed);
    }
    ExitCode::from(EXIT_SUCCESS)
}
