//! Configuration loading and discovery for `ssb.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SsbConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::runtime::LoopMode;

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "ssb.toml";

/// Directory under the XDG config home
const XDG_DIR_NAME: &str = "spritesheet-builder";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse ssb.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output directory
    pub out: Option<PathBuf>,
    /// Override archive packaging
    pub archive: Option<bool>,
    /// Override pretty printing of metadata
    pub pretty: Option<bool>,
    /// Override grid columns
    pub cols: Option<u32>,
    /// Override grid rows
    pub rows: Option<u32>,
    /// Override tile size (width, height)
    pub tile: Option<(u32, u32)>,
    /// Override row frame rate
    pub fps: Option<u32>,
    /// Override row loop mode
    pub loop_mode: Option<LoopMode>,
}

/// Find ssb.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join(XDG_DIR_NAME).join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find ssb.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an ssb.toml file.
///
/// If a path is provided, loads from that file. Otherwise walks up from the
/// current directory, then falls back to the XDG config, then to the
/// default configuration.
///
/// A relative `export.out` in an explicit or walked-up file is resolved
/// against that file's directory. The XDG file and the defaults keep it
/// relative to the current directory.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("game/ssb.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<SsbConfig, ConfigError> {
    let local = match path {
        Some(p) => Some(p.to_path_buf()),
        None => env::current_dir().ok().and_then(find_config_from),
    };
    if let Some(p) = local {
        log::debug!("Using config {}", p.display());
        let mut config = load_config_file(&p)?;
        if let Some(root) = project_root(&p) {
            config.export.out = resolve_path(root, &config.export.out);
        }
        return Ok(config);
    }

    match find_xdg_config() {
        Some(p) => {
            log::debug!("Using config {}", p.display());
            load_config_file(&p)
        }
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SsbConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SsbConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Configuration used when no ssb.toml is found.
pub fn default_config() -> SsbConfig {
    SsbConfig::default()
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut SsbConfig, overrides: &CliOverrides) {
    if let Some(ref out) = overrides.out {
        config.export.out = out.clone();
    }
    if let Some(archive) = overrides.archive {
        config.export.archive = archive;
    }
    if let Some(pretty) = overrides.pretty {
        config.export.pretty = pretty;
    }

    if let Some(cols) = overrides.cols {
        config.grid.cols = cols;
    }
    if let Some(rows) = overrides.rows {
        config.grid.rows = rows;
    }
    if let Some((width, height)) = overrides.tile {
        config.grid.tile_width = width;
        config.grid.tile_height = height;
    }

    if let Some(fps) = overrides.fps {
        config.rows.fps = fps;
    }
    if let Some(loop_mode) = overrides.loop_mode {
        config.rows.loop_mode = loop_mode;
    }
}

/// Get the directory a config file applies to.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
