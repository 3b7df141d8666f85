//! Export command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::export::{export_bundle, ExportError, ExportOptions};
use crate::project::load_project;

use super::{resolve_config, EXIT_ERROR, EXIT_SUCCESS};

/// Execute the export command
pub fn run_export(path: &Path, config_path: Option<&Path>, overrides: &CliOverrides) -> ExitCode {
    let config = match resolve_config(config_path, overrides) {
        Ok(config) => config,
        Err(code) => return code,
    };

    let loaded = match load_project(path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let options = ExportOptions { archive: config.export.archive, pretty: config.export.pretty };
    let report = match export_bundle(&loaded.project, &loaded.cells, &config.export.out, &options) {
        Ok(report) => report,
        Err(ExportError::Validation(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
        Err(e) => {
            eprintln!("Error: Export failed: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    for cell in &report.skipped_cells {
        eprintln!(
            "Warning: Skipped unreadable frame at row {}, column {}: {}",
            cell.row,
            cell.col,
            cell.path.display()
        );
    }
    for failure in &report.copy_failures {
        eprintln!("Warning: Could not copy sound {}: {}", failure.file.display(), failure.error);
    }

    println!("Exported {}", report.summary());
    println!("  {}", report.atlas_path.display());
    println!("  {}", report.meta_path.display());
    println!("  {}", report.helper_path.display());
    ExitCode::from(EXIT_SUCCESS)
}
