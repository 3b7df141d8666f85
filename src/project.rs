//! Project files - load and save a project with its cell placements

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{CellGrid, ProjectModel};

/// Error reading or writing a project file.
#[derive(Debug, Error)]
pub enum ProjectFileError {
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize project: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Invalid source pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// On-disk layout: the project fields plus optional cell placements.
#[derive(Debug, Serialize, Deserialize)]
struct ProjectFile {
    #[serde(flatten)]
    project: ProjectModel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cells: Option<Vec<Vec<Option<PathBuf>>>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cells_basenames: Option<Vec<Vec<Option<String>>>>,
}

/// A project read from disk with its cells resolved.
#[derive(Debug, Clone)]
pub struct LoadedProject {
    pub project: ProjectModel,
    pub cells: CellGrid,
}

/// Read a project file.
///
/// Cells are sized to the project's grid and resolved with
/// [`resolve_cells`]; a settings-only file yields an empty grid.
pub fn load_project(path: &Path) -> Result<LoadedProject, ProjectFileError> {
    let content = fs::read_to_string(path)
        .map_err(|source| ProjectFileError::Io { path: path.to_path_buf(), source })?;
    let file: ProjectFile = serde_json::from_str(&content)
        .map_err(|source| ProjectFileError::Parse { path: path.to_path_buf(), source })?;

    let cells = resolve_cells(
        &file.project,
        file.cells.as_deref().unwrap_or_default(),
        file.cells_basenames.as_deref().unwrap_or_default(),
    );
    log::debug!("Loaded project {} ({} cells assigned)", path.display(), cells.assigned());
    Ok(LoadedProject { project: file.project, cells })
}

/// Resolve stored placements against the filesystem.
///
/// A cell keeps its stored path when that file exists; otherwise the
/// file name is looked up in the project's source folder. Cells that
/// resolve to nothing are left empty.
pub fn resolve_cells(
    project: &ProjectModel,
    stored: &[Vec<Option<PathBuf>>],
    basenames: &[Vec<Option<String>>],
) -> CellGrid {
    let mut cells = CellGrid::for_grid(&project.grid);
    for r in 0..cells.rows() {
        for c in 0..cells.cols() {
            let stored_path = stored.get(r).and_then(|row| row.get(c)).and_then(Option::as_ref);
            if let Some(path) = stored_path.filter(|p| p.is_file()) {
                cells.set(r, c, Some(path.clone()));
                continue;
            }
            let name = basenames
                .get(r)
                .and_then(|row| row.get(c))
                .and_then(Option::clone)
                .or_else(|| {
                    stored_path
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().into_owned())
                });
            let fallback = name.map(|n| project.source_folder.join(n)).filter(|p| p.is_file());
            cells.set(r, c, fallback);
        }
    }
    cells
}

/// Write a project file as pretty JSON.
///
/// Passing `None` for `cells` writes a settings-only file. Relative source
/// and cell paths are written against the working directory, so the file
/// loads the same from any directory.
pub fn save_project(
    path: &Path,
    project: &ProjectModel,
    cells: Option<&CellGrid>,
) -> Result<(), ProjectFileError> {
    let cwd = std::env::current_dir()
        .map_err(|source| ProjectFileError::Io { path: PathBuf::from("."), source })?;
    let mut project = project.clone();
    project.source_folder = absolute_from(&cwd, &project.source_folder);
    let file = ProjectFile {
        project,
        cells: cells.map(|cells| absolute_cells(&cwd, cells)),
        cells_basenames: cells.map(CellGrid::basenames),
    };
    let json = serde_json::to_string_pretty(&file)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|source| ProjectFileError::Io { path: parent.to_path_buf(), source })?;
    }
    fs::write(path, json).map_err(|source| ProjectFileError::Io { path: path.to_path_buf(), source })
}

/// `path` unchanged when absolute, otherwise joined onto `base`.
fn absolute_from(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn absolute_cells(base: &Path, cells: &CellGrid) -> Vec<Vec<Option<PathBuf>>> {
    cells
        .to_rows()
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.map(|p| absolute_from(base, &p))).collect())
        .collect()
}

/// Copy grid and row settings from another project file onto `project`.
pub fn apply_settings_file(project: &mut ProjectModel, path: &Path) -> Result<(), ProjectFileError> {
    let settings = load_project(path)?;
    project.apply_settings(&settings.project);
    Ok(())
}

/// PNG frames in `folder`, in playback order.
///
/// Matching is case-insensitive. Files sort numerically by stem when
/// every stem is an integer, otherwise by file name.
pub fn list_source_images(folder: &Path) -> Result<Vec<PathBuf>, ProjectFileError> {
    let pattern = format!("{}/*.png", Pattern::escape(&folder.to_string_lossy()));
    let options = MatchOptions { case_sensitive: false, ..MatchOptions::new() };
    let mut images: Vec<PathBuf> =
        glob::glob_with(&pattern, options)?.filter_map(Result::ok).filter(|p| p.is_file()).collect();

    let numbers: Option<Vec<u64>> = images
        .iter()
        .map(|p| p.file_stem().and_then(|s| s.to_str()).and_then(|s| s.parse().ok()))
        .collect();
    match numbers {
        Some(numbers) if !images.is_empty() => {
            let mut keyed: Vec<(u64, PathBuf)> = numbers.into_iter().zip(images).collect();
            keyed.sort();
            images = keyed.into_iter().map(|(_, p)| p).collect();
        }
        _ => images.sort_by_key(|p| p.file_name().map(|n| n.to_os_string())),
    }
    Ok(images)
}
