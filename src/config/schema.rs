//! Configuration schema types for `ssb.toml`
//!
//! Defines the structure and validation rules for builder configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{GridConfig, MAX_FPS, MAX_SOURCE_SCALE, MIN_FPS, MIN_SOURCE_SCALE};
use crate::runtime::LoopMode;

/// Export settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory bundles are written into
    #[serde(default = "default_out")]
    pub out: PathBuf,
    /// Package each bundle into a zip archive
    #[serde(default = "default_true")]
    pub archive: bool,
    /// Pretty print `meta.json`
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { out: default_out(), archive: true, pretty: true }
    }
}

fn default_out() -> PathBuf {
    PathBuf::from("dist")
}

fn default_true() -> bool {
    true
}

/// Grid settings for new projects
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDefaults {
    pub cols: u32,
    pub rows: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub padding: u32,
    pub margin: u32,
    pub power_of_two: bool,
    /// Source pre-scale in percent
    pub source_scale: u32,
}

impl Default for GridDefaults {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            cols: grid.cols,
            rows: grid.rows,
            tile_width: grid.tile_width,
            tile_height: grid.tile_height,
            padding: grid.padding,
            margin: grid.margin,
            power_of_two: grid.power_of_two,
            source_scale: grid.source_scale,
        }
    }
}

impl GridDefaults {
    /// Grid configuration seeded from these defaults.
    pub fn to_grid(&self) -> GridConfig {
        GridConfig {
            cols: self.cols,
            rows: self.rows,
            tile_width: self.tile_width,
            tile_height: self.tile_height,
            padding: self.padding,
            margin: self.margin,
            power_of_two: self.power_of_two,
            source_scale: self.source_scale,
            ..GridConfig::default()
        }
    }
}

/// Playback settings for new rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDefaults {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default)]
    pub loop_mode: LoopMode,
}

impl Default for RowDefaults {
    fn default() -> Self {
        Self { fps: default_fps(), loop_mode: LoopMode::default() }
    }
}

fn default_fps() -> u32 {
    crate::models::DEFAULT_FPS
}

/// Complete `ssb.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SsbConfig {
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub grid: GridDefaults,
    #[serde(default)]
    pub rows: RowDefaults,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "grid.tile_width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ssb.toml: '{}' {}", self.field, self.message)
    }
}

impl SsbConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut error = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message })
        };

        for (field, value) in [
            ("grid.cols", self.grid.cols),
            ("grid.rows", self.grid.rows),
            ("grid.tile_width", self.grid.tile_width),
            ("grid.tile_height", self.grid.tile_height),
        ] {
            if value == 0 {
                error(field, "must be a positive integer".to_string());
            }
        }

        if !(MIN_SOURCE_SCALE..=MAX_SOURCE_SCALE).contains(&self.grid.source_scale) {
            error(
                "grid.source_scale",
                format!("must be between {} and {}", MIN_SOURCE_SCALE, MAX_SOURCE_SCALE),
            );
        }

        if !(MIN_FPS..=MAX_FPS).contains(&self.rows.fps) {
            error("rows.fps", format!("must be between {} and {}", MIN_FPS, MAX_FPS));
        }

        if self.export.out.as_os_str().is_empty() {
            error("export.out", "must be a non-empty path".to_string());
        }

        errors
    }
}
