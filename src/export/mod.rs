//! Bundle export - atlas image, metadata, sounds, runtime helper and archive.
//!
//! A bundle is written to `<dest>/<sheet_name>/`:
//!
//! - `spritesheet.png`: the composited atlas
//! - `meta.json`: per-row frames, playback settings and sounds
//! - `sounds/`: copies of every referenced audio file
//! - `sprite_runtime.rs`: the standalone playback helper
//!
//! and, unless disabled, archived to `<dest>/<sheet_name>.zip`.
//!
//! Export is not transactional. A failure part-way leaves the files
//! already written in place.

mod archive;
mod meta;
mod sounds;

pub use archive::write_archive;
pub use meta::{BundleMeta, RowEntry};
pub use sounds::{CopyFailure, SoundCollector};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::atlas::{self, SkippedCell};
use crate::models::{CellGrid, ProjectModel, ValidationError};
use crate::runtime;

/// Atlas image file name inside a bundle.
pub const ATLAS_FILE_NAME: &str = "spritesheet.png";
/// Metadata file name inside a bundle.
pub const META_FILE_NAME: &str = runtime::loader::META_FILE;
/// Sound directory name inside a bundle.
pub const SOUNDS_DIR: &str = "sounds";

/// Error that aborts an export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid project: {0}")]
    Validation(#[from] ValidationError),
    #[error("IO error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to write archive {}: {source}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ExportError::Io { path: path.into(), source }
    }
}

/// Options for export operations.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Package the bundle into a zip archive
    pub archive: bool,
    /// Pretty print `meta.json` (with indentation)
    pub pretty: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { archive: true, pretty: true }
    }
}

/// What an export produced, including the problems it skipped over.
#[derive(Debug)]
pub struct ExportReport {
    pub bundle_dir: PathBuf,
    pub atlas_path: PathBuf,
    pub meta_path: PathBuf,
    pub helper_path: PathBuf,
    pub archive_path: Option<PathBuf>,
    /// Rendered frames per row
    pub frame_counts: Vec<usize>,
    /// Assigned cells whose source could not be decoded
    pub skipped_cells: Vec<SkippedCell>,
    /// Sound files that could not be copied into the bundle
    pub copy_failures: Vec<CopyFailure>,
}

impl ExportReport {
    pub fn total_frames(&self) -> usize {
        self.frame_counts.iter().sum()
    }

    /// True when nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.skipped_cells.is_empty() && self.copy_failures.is_empty()
    }

    /// One-line description for logs and CLI output.
    pub fn summary(&self) -> String {
        format!(
            "{} frame(s) in {} row(s) -> {}",
            self.total_frames(),
            self.frame_counts.len(),
            self.archive_path.as_deref().unwrap_or(self.bundle_dir.as_path()).display()
        )
    }
}

/// Export a project to `<dest>/<sheet_name>/`.
///
/// Validation happens before anything touches the disk.
pub fn export_bundle(
    project: &ProjectModel,
    cells: &CellGrid,
    dest: &Path,
    options: &ExportOptions,
) -> Result<ExportReport, ExportError> {
    project.validate()?;

    let sheet_name = project.sheet_name.trim();
    let bundle_dir = dest.join(sheet_name);
    let sounds_dir = bundle_dir.join(SOUNDS_DIR);
    fs::create_dir_all(&sounds_dir).map_err(|e| ExportError::io(&sounds_dir, e))?;
    log::info!("Exporting '{}' to {}", sheet_name, bundle_dir.display());

    let composite = atlas::compose(&project.grid, cells);
    let atlas_path = bundle_dir.join(ATLAS_FILE_NAME);
    composite
        .image
        .save(&atlas_path)
        .map_err(|source| ExportError::Image { path: atlas_path.clone(), source })?;
    log::debug!(
        "Wrote {} ({}x{})",
        atlas_path.display(),
        composite.image.width(),
        composite.image.height()
    );

    let mut collector = SoundCollector::new(&bundle_dir, &project.source_folder);
    let meta = BundleMeta::build(project, &composite.rows, &mut collector);

    let meta_path = bundle_dir.join(META_FILE_NAME);
    let json = if options.pretty {
        serde_json::to_string_pretty(&meta)?
    } else {
        serde_json::to_string(&meta)?
    };
    fs::write(&meta_path, json).map_err(|e| ExportError::io(&meta_path, e))?;

    let helper_path = bundle_dir.join(runtime::HELPER_FILE_NAME);
    fs::write(&helper_path, runtime::helper_source()).map_err(|e| ExportError::io(&helper_path, e))?;

    let archive_path = if options.archive {
        let path = dest.join(format!("{}.zip", sheet_name));
        write_archive(&bundle_dir, &path)?;
        Some(path)
    } else {
        None
    };

    let copy_failures = collector.into_failures();
    for skipped in &composite.skipped {
        log::warn!("Cell ({}, {}) skipped: {}", skipped.row, skipped.col, skipped.path.display());
    }

    let report = ExportReport {
        frame_counts: composite.rows.iter().map(Vec::len).collect(),
        skipped_cells: composite.skipped,
        bundle_dir,
        atlas_path,
        meta_path,
        helper_path,
        archive_path,
        copy_failures,
    };
    log::info!("Exported {}", report.summary());
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn project_with_frames(dir: &Path, count: usize) -> (ProjectModel, CellGrid) {
        let source = dir.join("frames");
        fs::create_dir_all(&source).unwrap();
        let mut project = ProjectModel::new("hero", &source);
        project.set_grid_size(2, 2);
        project.set_tile_size(8, 8);
        let images: Vec<PathBuf> = (0..count)
            .map(|i| {
                let path = source.join(format!("{}.png", i));
                RgbaImage::from_pixel(8, 8, Rgba([i as u8, 0, 0, 255])).save(&path).unwrap();
                path
            })
            .collect();
        let mut cells = CellGrid::for_grid(&project.grid);
        cells.fill_sequential(&images);
        (project, cells)
    }

    #[test]
    fn test_export_options_default() {
        let options = ExportOptions::default();
        assert!(options.pretty);
        assert!(options.archive);
    }

    #[test]
    fn test_export_error_display() {
        let io_err = ExportError::io(
            "out/meta.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        );
        assert!(io_err.to_string().contains("IO error"));
        assert!(io_err.to_string().contains("meta.json"));

        let err: ExportError = ValidationError::MissingSheetName.into();
        assert_eq!(err.to_string(), "Invalid project: Sheet name is required");
    }

    #[test]
    fn test_validation_runs_before_io() {
        let dir = TempDir::new().unwrap();
        let (mut project, cells) = project_with_frames(dir.path(), 1);
        project.sheet_name.clear();
        let dest = dir.path().join("out");
        let err = export_bundle(&project, &cells, &dest, &ExportOptions::default()).unwrap_err();
        assert!(matches!(err, ExportError::Validation(ValidationError::MissingSheetName)));
        assert!(!dest.exists());
    }

    #[test]
    fn test_export_writes_bundle() {
        let dir = TempDir::new().unwrap();
        let (project, cells) = project_with_frames(dir.path(), 3);
        let dest = dir.path().join("out");
        let report = export_bundle(&project, &cells, &dest, &ExportOptions::default()).unwrap();

        assert_eq!(report.bundle_dir, dest.join("hero"));
        assert!(report.atlas_path.is_file());
        assert!(report.meta_path.is_file());
        assert!(report.helper_path.is_file());
        assert!(report.bundle_dir.join(SOUNDS_DIR).is_dir());
        assert_eq!(report.archive_path.as_deref(), Some(dest.join("hero.zip").as_path()));
        assert_eq!(report.frame_counts, vec![2, 1]);
        assert!(report.is_clean());

        let atlas = image::open(&report.atlas_path).unwrap();
        assert_eq!((atlas.width(), atlas.height()), (16, 16));
    }

    #[test]
    fn test_export_without_archive() {
        let dir = TempDir::new().unwrap();
        let (project, cells) = project_with_frames(dir.path(), 1);
        let dest = dir.path().join("out");
        let options = ExportOptions { archive: false, pretty: false };
        let report = export_bundle(&project, &cells, &dest, &options).unwrap();
        assert!(report.archive_path.is_none());
        assert!(!dest.join("hero.zip").exists());
        let meta = fs::read_to_string(&report.meta_path).unwrap();
        assert!(!meta.contains('\n'));
    }

    #[test]
    fn test_report_summary() {
        let dir = TempDir::new().unwrap();
        let (project, cells) = project_with_frames(dir.path(), 4);
        let options = ExportOptions { archive: false, ..Default::default() };
        let report = export_bundle(&project, &cells, dir.path(), &options).unwrap();
        assert!(report.summary().starts_with("4 frame(s) in 2 row(s)"));
    }
}
