//! Zip packaging of an exported bundle

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use zip::write::FileOptions;
use zip::CompressionMethod;

use super::{ExportError, ATLAS_FILE_NAME, META_FILE_NAME, SOUNDS_DIR};
use crate::runtime::HELPER_FILE_NAME;

/// Files of a bundle in archive order: atlas, metadata, helper, then the
/// sorted contents of `sounds/`.
pub fn bundle_files(bundle_dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut files: Vec<PathBuf> = [ATLAS_FILE_NAME, META_FILE_NAME, HELPER_FILE_NAME]
        .iter()
        .map(|name| bundle_dir.join(name))
        .filter(|path| path.is_file())
        .collect();

    let sounds_dir = bundle_dir.join(SOUNDS_DIR);
    if sounds_dir.is_dir() {
        let entries = fs::read_dir(&sounds_dir).map_err(|e| ExportError::io(&sounds_dir, e))?;
        let mut sounds = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ExportError::io(&sounds_dir, e))?.path();
            if path.is_file() {
                sounds.push(path);
            }
        }
        sounds.sort();
        files.extend(sounds);
    }
    Ok(files)
}

/// Entry name of `path`: relative to the bundle's parent with `/`
/// separators, so the bundle directory is the archive root.
fn entry_name(bundle_dir: &Path, path: &Path) -> String {
    let root = bundle_dir.parent().unwrap_or(bundle_dir);
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Write `bundle_dir` into a zip archive at `archive_path`.
pub fn write_archive(bundle_dir: &Path, archive_path: &Path) -> Result<(), ExportError> {
    let archive_err = |source| ExportError::Archive { path: archive_path.to_path_buf(), source };

    let files = bundle_files(bundle_dir)?;
    let file = File::create(archive_path).map_err(|e| ExportError::io(archive_path, e))?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let data = fs::read(path).map_err(|e| ExportError::io(path, e))?;
        zip.start_file(entry_name(bundle_dir, path), options).map_err(archive_err)?;
        zip.write_all(&data).map_err(|e| ExportError::io(archive_path, e))?;
    }
    zip.finish().map_err(archive_err)?;
    log::debug!("Archived {} file(s) into {}", files.len(), archive_path.display());
    Ok(())
}
