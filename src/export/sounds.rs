//! Copies referenced audio into the bundle and rewrites references

use std::fs;
use std::path::{Path, PathBuf};

use super::SOUNDS_DIR;

/// A sound file that could not be copied into the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyFailure {
    pub file: PathBuf,
    pub error: String,
}

/// Relocates sound references into a bundle's `sounds/` directory.
///
/// Files with the same name from different folders overwrite each other.
#[derive(Debug)]
pub struct SoundCollector {
    sounds_dir: PathBuf,
    source_folder: PathBuf,
    failures: Vec<CopyFailure>,
}

impl SoundCollector {
    /// Collector for the bundle at `bundle_dir`. Relative sound paths
    /// that don't exist as given are looked up in `source_folder`.
    pub fn new(bundle_dir: &Path, source_folder: &Path) -> Self {
        Self {
            sounds_dir: bundle_dir.join(SOUNDS_DIR),
            source_folder: source_folder.to_path_buf(),
            failures: Vec::new(),
        }
    }

    fn locate(&self, file: &str) -> Option<PathBuf> {
        if file.is_empty() {
            return None;
        }
        let path = PathBuf::from(file);
        if path.is_file() {
            return Some(path);
        }
        let in_source = self.source_folder.join(&path);
        (path.is_relative() && in_source.is_file()).then_some(in_source)
    }

    /// Copy `file` into `sounds/` and return the bundle-relative reference.
    ///
    /// Empty or missing files are returned unchanged. A failed copy is
    /// recorded and the reference still points into `sounds/`.
    pub fn relocate(&mut self, file: &str) -> String {
        let Some(source) = self.locate(file) else {
            return file.to_string();
        };
        let Some(name) = source.file_name() else {
            return file.to_string();
        };
        let target = self.sounds_dir.join(name);

        if !same_file(&source, &target) {
            if let Err(e) = fs::copy(&source, &target) {
                log::warn!("Failed to copy sound {}: {}", source.display(), e);
                self.failures.push(CopyFailure { file: source.clone(), error: e.to_string() });
            }
        }
        format!("{}/{}", SOUNDS_DIR, name.to_string_lossy())
    }

    pub fn failures(&self) -> &[CopyFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<CopyFailure> {
        self.failures
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let dir = TempDir::new().unwrap();
        let bundle = dir.path().join("bundle");
        let source = dir.path().join("src");
        fs::create_dir_all(bundle.join(SOUNDS_DIR)).unwrap();
        fs::create_dir_all(&source).unwrap();
        (dir, bundle, source)
    }

    #[test]
    fn test_copies_and_rewrites() {
        let (_dir, bundle, source) = setup();
        let wav = source.join("step.wav");
        fs::write(&wav, b"RIFF").unwrap();

        let mut collector = SoundCollector::new(&bundle, &source);
        let rewritten = collector.relocate(&wav.to_string_lossy());
        assert_eq!(rewritten, "sounds/step.wav");
        assert_eq!(fs::read(bundle.join("sounds/step.wav")).unwrap(), b"RIFF");
        assert!(collector.failures().is_empty());
    }

    #[test]
    fn test_relative_path_found_in_source_folder() {
        let (_dir, bundle, source) = setup();
        fs::write(source.join("jump.ogg"), b"OggS").unwrap();
        let mut collector = SoundCollector::new(&bundle, &source);
        assert_eq!(collector.relocate("jump.ogg"), "sounds/jump.ogg");
        assert!(bundle.join("sounds/jump.ogg").is_file());
    }

    #[test]
    fn test_empty_and_missing_unchanged() {
        let (_dir, bundle, source) = setup();
        let mut collector = SoundCollector::new(&bundle, &source);
        assert_eq!(collector.relocate(""), "");
        assert_eq!(collector.relocate("/no/such/file.wav"), "/no/such/file.wav");
        assert!(collector.into_failures().is_empty());
    }

    #[test]
    fn test_already_in_bundle_is_not_copied() {
        let (_dir, bundle, source) = setup();
        let inside = bundle.join("sounds/hit.wav");
        fs::write(&inside, b"data").unwrap();
        let mut collector = SoundCollector::new(&bundle, &source);
        assert_eq!(collector.relocate(&inside.to_string_lossy()), "sounds/hit.wav");
        assert_eq!(fs::read(&inside).unwrap(), b"data");
        assert!(collector.failures().is_empty());
    }

    #[test]
    fn test_copy_failure_recorded() {
        let (_dir, bundle, source) = setup();
        let wav = source.join("boom.wav");
        fs::write(&wav, b"x").unwrap();
        // A directory where the copy should land makes fs::copy fail.
        fs::create_dir_all(bundle.join("sounds/boom.wav")).unwrap();

        let mut collector = SoundCollector::new(&bundle, &source);
        assert_eq!(collector.relocate(&wav.to_string_lossy()), "sounds/boom.wav");
        let failures = collector.into_failures();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].file, wav);
    }
}
